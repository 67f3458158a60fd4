//! Mapping from metadata-API payloads to the review form's vocabulary.
//!
//! The metadata service has its own genre/platform taxonomy; these
//! functions fold it into the site's fixed options and assemble the
//! auto-fill draft the admin form consumes.

use serde::Serialize;

use crate::client::{GameDetail, GenreRef, PlatformRef, TagRef};

/// Maximum number of tags suggested for a draft.
const MAX_TAGS: usize = 5;

/// API genre slug -> site genre option.
const GENRE_MAP: &[(&str, &str)] = &[
    ("action", "Action Adventure"),
    ("adventure", "Action Adventure"),
    ("rpg", "RPG"),
    ("shooter", "FPS"),
    ("strategy", "Strategy"),
    ("sports", "Sports"),
    ("racing", "Racing"),
    ("puzzle", "Puzzle"),
    ("simulation", "Simulation"),
    ("indie", "Indie"),
    ("horror", "Horror"),
];

/// API platform slug -> site platform checkbox value.
const PLATFORM_MAP: &[(&str, &str)] = &[
    ("pc", "PC"),
    ("playstation5", "PS5"),
    ("playstation4", "PS4"),
    ("xbox-series-x", "Xbox Series X"),
    ("xbox-one", "Xbox One"),
    ("nintendo-switch", "Nintendo Switch"),
    ("ios", "Mobile"),
    ("android", "Mobile"),
];

/// Mode keyword -> canonical mode label, checked against tag names.
const MODE_KEYWORDS: &[(&str, &str)] = &[
    ("singleplayer", "Singleplayer"),
    ("multiplayer", "Multiplayer"),
    ("co-op", "Co-op"),
    ("coop", "Co-op"),
    ("cooperative", "Co-op"),
    ("split-screen", "Split-screen"),
    ("split screen", "Split-screen"),
];

/// Map API genres to one site genre option.
///
/// A game carrying both `action` and `rpg` is an "Action RPG"; otherwise
/// the first mappable genre wins, and anything unmappable is "Other".
pub fn map_genre(genres: &[GenreRef]) -> String {
    if genres.is_empty() {
        return String::new();
    }

    let slugs: Vec<String> = genres.iter().map(|g| g.slug.to_lowercase()).collect();
    if slugs.iter().any(|s| s == "action") && slugs.iter().any(|s| s == "rpg") {
        return "Action RPG".to_string();
    }

    for slug in &slugs {
        if let Some((_, mapped)) = GENRE_MAP.iter().find(|(from, _)| from == slug) {
            return (*mapped).to_string();
        }
    }

    "Other".to_string()
}

/// Map API platforms to the site's platform checkbox values, deduplicated
/// (iOS and Android both fold into "Mobile").
pub fn map_platforms(platforms: &[PlatformRef]) -> Vec<String> {
    let mut mapped: Vec<String> = Vec::new();

    for p in platforms {
        let slug = p.platform.slug.as_str();
        if let Some((_, value)) = PLATFORM_MAP.iter().find(|(from, _)| *from == slug) {
            if !mapped.iter().any(|m| m == value) {
                mapped.push((*value).to_string());
            }
        }
    }

    mapped
}

/// Suggest up to [`MAX_TAGS`] tags: genre names first, then English API
/// tags, deduplicated in order.
pub fn derive_tags(genres: &[GenreRef], tags: &[TagRef]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for name in genres.iter().take(3).map(|g| g.name.clone()).chain(
        tags.iter()
            .filter(|t| t.language.as_deref() == Some("eng"))
            .take(3)
            .map(|t| t.name.clone()),
    ) {
        if !out.contains(&name) {
            out.push(name);
        }
    }

    out.truncate(MAX_TAGS);
    out
}

/// Infer play modes from tag names.
pub fn map_modes(tags: &[TagRef]) -> Vec<String> {
    let mut modes: Vec<String> = Vec::new();

    for tag in tags {
        let name = tag.name.to_lowercase();
        for (keyword, label) in MODE_KEYWORDS {
            if name.contains(keyword) && !modes.iter().any(|m| m == label) {
                modes.push((*label).to_string());
            }
        }
    }

    modes
}

/* --------------------------------------------------------------------------
Auto-fill draft
-------------------------------------------------------------------------- */

/// Pre-filled review form values derived from one game's metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub title: String,
    pub genre: String,
    pub platforms: Vec<String>,
    /// The API's key art doubles as cover and header suggestion.
    pub cover_image: Option<String>,
    pub header_image: Option<String>,
    pub tags: Vec<String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    pub modes: Vec<String>,
    pub release_year: Option<String>,
}

/// Assemble the admin form auto-fill draft for a game.
pub fn autofill_draft(game: &GameDetail) -> ReviewDraft {
    ReviewDraft {
        title: game.name.clone(),
        genre: map_genre(&game.genres),
        platforms: map_platforms(&game.platforms),
        cover_image: game.background_image.clone(),
        header_image: game.background_image.clone(),
        tags: derive_tags(&game.genres, &game.tags),
        developers: game.developers.iter().map(|d| d.name.clone()).collect(),
        publishers: game.publishers.iter().map(|p| p.name.clone()).collect(),
        modes: map_modes(&game.tags),
        release_year: game
            .released
            .as_deref()
            .and_then(|r| r.get(..4))
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::NamedSlugRef;

    fn genre(name: &str, slug: &str) -> GenreRef {
        GenreRef {
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    fn platform(name: &str, slug: &str) -> PlatformRef {
        PlatformRef {
            platform: NamedSlugRef {
                name: name.to_string(),
                slug: slug.to_string(),
            },
        }
    }

    fn tag(name: &str, language: &str) -> TagRef {
        TagRef {
            name: name.to_string(),
            language: Some(language.to_string()),
        }
    }

    #[test]
    fn action_plus_rpg_maps_to_action_rpg() {
        let genres = [genre("Action", "action"), genre("RPG", "rpg")];
        assert_eq!(map_genre(&genres), "Action RPG");
    }

    #[test]
    fn first_mappable_genre_wins() {
        let genres = [genre("Board Games", "board-games"), genre("Shooter", "shooter")];
        assert_eq!(map_genre(&genres), "FPS");
    }

    #[test]
    fn unmappable_genres_fall_back_to_other() {
        assert_eq!(map_genre(&[genre("Card", "card")]), "Other");
        assert_eq!(map_genre(&[]), "");
    }

    #[test]
    fn mobile_platforms_are_deduplicated() {
        let platforms = [
            platform("iOS", "ios"),
            platform("Android", "android"),
            platform("PC", "pc"),
        ];
        assert_eq!(map_platforms(&platforms), vec!["Mobile", "PC"]);
    }

    #[test]
    fn unknown_platforms_are_skipped() {
        let platforms = [platform("Dreamcast", "dreamcast")];
        assert!(map_platforms(&platforms).is_empty());
    }

    #[test]
    fn tags_prefer_genres_then_english_tags_capped_at_five() {
        let genres = [
            genre("Action", "action"),
            genre("RPG", "rpg"),
            genre("Indie", "indie"),
        ];
        let tags = [
            tag("Atmospheric", "eng"),
            tag("Атмосферная", "rus"),
            tag("Open World", "eng"),
            tag("Souls-like", "eng"),
        ];

        let out = derive_tags(&genres, &tags);
        assert_eq!(out, vec!["Action", "RPG", "Indie", "Atmospheric", "Open World"]);
    }

    #[test]
    fn duplicate_tag_names_are_removed() {
        let genres = [genre("Indie", "indie")];
        let tags = [tag("Indie", "eng")];

        assert_eq!(derive_tags(&genres, &tags), vec!["Indie"]);
    }

    #[test]
    fn modes_inferred_from_tag_keywords() {
        let tags = [
            tag("Online multiplayer", "eng"),
            tag("Local Co-op", "eng"),
            tag("Atmospheric", "eng"),
        ];

        assert_eq!(map_modes(&tags), vec!["Multiplayer", "Co-op"]);
    }

    #[test]
    fn draft_pulls_everything_together() {
        let game = GameDetail {
            id: 1,
            name: "Elden Ring".to_string(),
            released: Some("2022-02-25".to_string()),
            background_image: Some("https://example.com/art.jpg".to_string()),
            genres: vec![genre("Action", "action"), genre("RPG", "rpg")],
            platforms: vec![platform("PC", "pc"), platform("PS5", "playstation5")],
            tags: vec![tag("Souls-like", "eng"), tag("Co-op", "eng")],
            developers: vec![crate::client::NamedRef {
                name: "FromSoftware".to_string(),
            }],
            publishers: vec![crate::client::NamedRef {
                name: "Bandai Namco".to_string(),
            }],
            description_raw: None,
        };

        let draft = autofill_draft(&game);

        assert_eq!(draft.title, "Elden Ring");
        assert_eq!(draft.genre, "Action RPG");
        assert_eq!(draft.platforms, vec!["PC", "PS5"]);
        assert_eq!(draft.cover_image.as_deref(), Some("https://example.com/art.jpg"));
        assert_eq!(draft.developers, vec!["FromSoftware"]);
        assert_eq!(draft.release_year.as_deref(), Some("2022"));
        assert_eq!(draft.modes, vec!["Co-op"]);
    }
}
