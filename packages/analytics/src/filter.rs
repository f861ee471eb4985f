//! Predicate-based row filter.
//!
//! [`FilterCriteria`] is compiled into a list of predicates, one per
//! constrained dimension, and a row passes when every predicate accepts it.
//! Unconstrained dimensions (including empty selections) contribute no
//! predicate at all.

use crime_dashboard_analytics_models::FilterCriteria;
use crime_dashboard_crime_models::Incident;

/// A single row test.
pub type Predicate<'c> = Box<dyn Fn(&Incident) -> bool + 'c>;

/// Compiles criteria into one predicate per constrained dimension.
#[must_use]
pub fn predicates(criteria: &FilterCriteria) -> Vec<Predicate<'_>> {
    let mut predicates: Vec<Predicate<'_>> = Vec::with_capacity(4);

    if criteria.year.is_active() {
        let year = criteria.year;
        predicates.push(Box::new(move |incident: &Incident| year.contains(incident.year)));
    }

    if criteria.month.is_active() {
        let month = criteria.month;
        predicates.push(Box::new(move |incident: &Incident| month.contains(incident.month)));
    }

    if let Some(names) = criteria.neighborhoods.values() {
        predicates.push(Box::new(move |incident: &Incident| {
            incident
                .neighborhood()
                .is_some_and(|name| names.contains(name))
        }));
    }

    if let Some(categories) = criteria.categories.values() {
        predicates.push(Box::new(move |incident: &Incident| {
            categories.contains(incident.category.as_str())
        }));
    }

    predicates
}

/// Returns the incidents matching every constrained dimension, in input
/// order.
pub fn apply<'a, I>(incidents: I, criteria: &FilterCriteria) -> Vec<&'a Incident>
where
    I: IntoIterator<Item = &'a Incident>,
{
    let predicates = predicates(criteria);
    incidents
        .into_iter()
        .filter(|incident| predicates.iter().all(|predicate| predicate(*incident)))
        .collect()
}
