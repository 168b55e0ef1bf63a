//! Quotes bundled with the app for seeding an empty inspirations collection.

use tango_core::NewInspiration;

const INSPIRATIONS: &str = include_str!("../data/inspirations.json");

pub fn inspirations() -> Vec<NewInspiration> {
    serde_json::from_str(INSPIRATIONS).expect("bundled inspirations are valid")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_bundled_inspirations() {
        let inspirations = inspirations();
        assert!(!inspirations.is_empty());
        assert!(inspirations
            .iter()
            .all(|inspiration| !inspiration.content.trim().is_empty()));
        assert_eq!(
            inspirations[0].source,
            "James Bach - Secrets of a Buccaneer-Scholar"
        );
        assert!(inspirations
            .iter()
            .any(|inspiration| inspiration.source == "@SpecialDogsNeedLoveToo - 留言"));
    }
}
