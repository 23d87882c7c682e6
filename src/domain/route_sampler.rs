use super::ContentUnit;

const SAMPLE_SEPARATOR: &str = "\n\n";
const LEAD_UNITS: usize = 3;

/// Picks the units shown to the classifier.
///
/// Fewer than 4 units are all used. With 4 to 7 units the first three plus
/// the last one are used; from 8 units on, the first three plus the unit at
/// `n / 2`.
pub fn sample_for_routing(units: &[ContentUnit]) -> String {
    let total = units.len();

    let selected: Vec<&ContentUnit> = if total < 4 {
        units.iter().collect()
    } else if total < 8 {
        units[..LEAD_UNITS]
            .iter()
            .chain(std::iter::once(&units[total - 1]))
            .collect()
    } else {
        units[..LEAD_UNITS]
            .iter()
            .chain(std::iter::once(&units[total / 2]))
            .collect()
    };

    selected
        .into_iter()
        .map(ContentUnit::text)
        .collect::<Vec<_>>()
        .join(SAMPLE_SEPARATOR)
}
