//! Top-N category ranking.

use crime_dashboard_analytics_models::{CategoryCount, CategoryRanking};
use crime_dashboard_crime_models::Incident;

/// A ranking together with the rows it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCategories<'a> {
    /// Categories that made the cut, highest count first.
    pub ranking: CategoryRanking,
    /// Input rows whose category is in `ranking`, in input order.
    pub rows: Vec<&'a Incident>,
}

/// Ranks categories by incident count and keeps the top `limit`.
///
/// Equal counts keep the order in which each category first appears in
/// `filtered`. The returned rows are `filtered` restricted to the ranked
/// categories, so anything drawn from them matches the displayed bars.
#[must_use]
pub fn rank_categories<'a>(filtered: &[&'a Incident], limit: usize) -> RankedCategories<'a> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for incident in filtered {
        match counts
            .iter_mut()
            .find(|entry| entry.category == incident.category)
        {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: incident.category.clone(),
                count: 1,
            }),
        }
    }

    // `sort_by` is stable, so ties stay in first-occurrence order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);

    let ranking = CategoryRanking(counts);
    let rows = filtered
        .iter()
        .copied()
        .filter(|incident| ranking.contains(&incident.category))
        .collect();

    RankedCategories { ranking, rows }
}

#[cfg(test)]
mod tests {
    use crime_dashboard_crime_models::DayOfWeek;

    use super::*;

    fn incident(category: &str) -> Incident {
        Incident::try_new("D4", 2017, 3, DayOfWeek::Wednesday, 12, category).unwrap()
    }

    fn names(ranking: &CategoryRanking) -> Vec<&str> {
        ranking.0.iter().map(|e| e.category.as_str()).collect()
    }

    #[test]
    fn ranks_by_descending_count() {
        let incidents = [
            Incident::try_new("D14", 2015, 6, DayOfWeek::Monday, 10, "Larceny").unwrap(),
            Incident::try_new("D14", 2015, 6, DayOfWeek::Monday, 10, "Larceny").unwrap(),
            Incident::try_new("B2", 2016, 1, DayOfWeek::Tuesday, 14, "Vandalism").unwrap(),
        ];
        let rows: Vec<&Incident> = incidents.iter().collect();

        let ranked = rank_categories(&rows, 10);

        assert_eq!(
            ranked.ranking.0,
            vec![
                CategoryCount { category: "Larceny".to_string(), count: 2 },
                CategoryCount { category: "Vandalism".to_string(), count: 1 },
            ]
        );
        assert_eq!(ranked.rows.len(), 3);
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let incidents = [
            incident("Towed"),
            incident("Larceny"),
            incident("Fraud"),
            incident("Larceny"),
            incident("Fraud"),
            incident("Towed"),
            incident("Arson"),
        ];
        let rows: Vec<&Incident> = incidents.iter().collect();

        let ranked = rank_categories(&rows, 10);

        assert_eq!(names(&ranked.ranking), vec!["Towed", "Larceny", "Fraud", "Arson"]);
    }

    #[test]
    fn truncates_and_refilters_rows() {
        let incidents = [
            incident("Larceny"),
            incident("Towed"),
            incident("Larceny"),
            incident("Fraud"),
            incident("Larceny"),
            incident("Towed"),
        ];
        let rows: Vec<&Incident> = incidents.iter().collect();

        let ranked = rank_categories(&rows, 2);

        assert_eq!(names(&ranked.ranking), vec!["Larceny", "Towed"]);
        assert_eq!(ranked.rows.len(), 5);
        assert!(ranked.rows.iter().all(|i| i.category != "Fraud"));
    }

    #[test]
    fn length_never_exceeds_limit() {
        let categories = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"];
        let incidents: Vec<Incident> = categories.iter().map(|c| incident(c)).collect();
        let rows: Vec<&Incident> = incidents.iter().collect();

        for limit in [0, 1, 5, 10, 12, 20] {
            let ranked = rank_categories(&rows, limit);
            assert!(ranked.ranking.0.len() <= limit, "limit {limit} exceeded");
            assert!(
                ranked
                    .ranking
                    .0
                    .windows(2)
                    .all(|w| w[0].count >= w[1].count)
            );
        }
        assert!(rank_categories(&rows, 0).rows.is_empty());
    }

    #[test]
    fn casing_distinguishes_categories() {
        let incidents = [
            incident("INVESTIGATE PERSON"),
            incident("Investigate Person"),
            incident("INVESTIGATE PERSON"),
        ];
        let rows: Vec<&Incident> = incidents.iter().collect();

        let ranked = rank_categories(&rows, 10);

        assert_eq!(
            names(&ranked.ranking),
            vec!["INVESTIGATE PERSON", "Investigate Person"]
        );
    }

    #[test]
    fn empty_input_yields_empty_ranking() {
        let ranked = rank_categories(&[], 10);
        assert!(ranked.ranking.0.is_empty());
        assert!(ranked.rows.is_empty());
    }
}
