//! Thematic rollup of keyword counts.

use crate::models::{EntityCounts, RankedEntity, ThemeNode};
use indexmap::IndexMap;

/// Group keyword counts under configured themes.
///
/// A theme's value is the sum of its keywords' counts. Themes and keywords
/// with a zero value are left out. A keyword listed under several themes is
/// counted in each of them, so theme values are not meant to add up to a
/// corpus total.
pub fn thematic_rollup(
    themes: &IndexMap<String, Vec<String>>,
    counts: &EntityCounts,
) -> Vec<ThemeNode> {
    themes
        .iter()
        .filter_map(|(theme, keywords)| {
            let children: Vec<RankedEntity> = keywords
                .iter()
                .map(|kw| RankedEntity::new(kw.clone(), counts.get(kw).copied().unwrap_or(0)))
                .filter(|child| child.count > 0)
                .collect();

            let value: u64 = children.iter().map(|child| child.count).sum();
            (value > 0).then(|| ThemeNode {
                theme: theme.clone(),
                value,
                keywords: children,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::counts;

    fn themes(defs: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        defs.iter()
            .map(|(name, kws)| (name.to_string(), kws.iter().map(|k| k.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_rollup_sums_and_skips_zero_keywords() {
        let defs = themes(&[("Géopolitique", &["russie", "ukraine", "otan"])]);
        let data = counts(&[("russie", 10), ("ukraine", 5)]);

        let nodes = thematic_rollup(&defs, &data);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].theme, "Géopolitique");
        assert_eq!(nodes[0].value, 15);
        assert_eq!(
            nodes[0].keywords,
            vec![RankedEntity::new("russie", 10), RankedEntity::new("ukraine", 5)]
        );
    }

    #[test]
    fn test_rollup_omits_empty_theme() {
        let defs = themes(&[
            ("Économie", &["budget", "banque"]),
            ("Afrique", &["mali"]),
        ]);
        let data = counts(&[("mali", 3), ("budget", 0)]);

        let nodes = thematic_rollup(&defs, &data);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].theme, "Afrique");
    }

    #[test]
    fn test_rollup_shared_keyword_counts_in_each_theme() {
        let defs = themes(&[("A", &["france"]), ("B", &["france", "mali"])]);
        let data = counts(&[("france", 4), ("mali", 1)]);

        let nodes = thematic_rollup(&defs, &data);

        assert_eq!(nodes[0].value, 4);
        assert_eq!(nodes[1].value, 5);
    }
}
