use meridian_domain::{AddOn, PricingType, Segment};

/// Absolute tolerance, in currency units, when comparing a client-submitted
/// total against the server-recomputed one.
pub const PRICE_TOLERANCE: f64 = 0.01;

/// Locate the contiguous segment span covering `from` → `to`.
///
/// Two independent linear scans: the first segment whose origin matches and
/// the first segment whose destination matches. Routes are assumed to have
/// unique origin/destination labels; duplicate labels resolve to the first
/// occurrence.
pub fn find_segment_span(segments: &[Segment], from: &str, to: &str) -> Option<(usize, usize)> {
    let start = segments.iter().position(|s| s.origin == from)?;
    let end = segments.iter().position(|s| s.destination == to)?;
    if end < start {
        return None;
    }
    Some((start, end))
}

/// Per-seat fare for the `from` → `to` sub-range: the inclusive sum of leg
/// costs over the matched span. `None` when the range does not match the
/// route.
pub fn price_segment_range(segments: &[Segment], from: &str, to: &str) -> Option<f64> {
    let (start, end) = find_segment_span(segments, from, to)?;
    Some(segments[start..=end].iter().map(|s| s.cost).sum())
}

/// Whether a route can carry a passenger from `from` to `to`: a segment
/// departing `from` followed (at or after it) by a segment arriving at `to`.
/// Used by trip search; unlike pricing this scans destinations only from the
/// matched origin onward.
pub fn serves_connection(segments: &[Segment], from: &str, to: &str) -> bool {
    match segments.iter().position(|s| s.origin == from) {
        Some(start) => segments[start..].iter().any(|s| s.destination == to),
        None => false,
    }
}

/// Destinations reachable from `from` on this route, in segment order.
pub fn reachable_destinations(segments: &[Segment], from: &str) -> Vec<String> {
    match segments.iter().position(|s| s.origin == from) {
        Some(start) => segments[start..].iter().map(|s| s.destination.clone()).collect(),
        None => Vec::new(),
    }
}

/// Total add-on contribution for a booking: per-booking add-ons count once,
/// per-passenger add-ons once per passenger.
pub fn price_add_ons(add_ons: &[AddOn], passenger_count: u32) -> f64 {
    add_ons
        .iter()
        .map(|a| match a.pricing_type {
            PricingType::PerBooking => a.price,
            PricingType::PerPassenger => a.price * f64::from(passenger_count),
        })
        .sum()
}

/// Authoritative booking total: seat fare for every passenger plus add-ons.
pub fn total_price(base_segment_cost: f64, passenger_count: u32, add_ons: &[AddOn]) -> f64 {
    base_segment_cost * f64::from(passenger_count) + price_add_ons(add_ons, passenger_count)
}

pub fn amounts_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= PRICE_TOLERANCE
}

/// Currency-major to minor units (kobo), the representation the payment
/// provider deals in.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_domain::TransportMode;

    fn seg(origin: &str, destination: &str, cost: f64) -> Segment {
        Segment {
            origin: origin.to_string(),
            destination: destination.to_string(),
            cost,
            mode: TransportMode::Road,
            duration_estimate: None,
        }
    }

    fn add_on(name: &str, price: f64, pricing_type: PricingType) -> AddOn {
        AddOn {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            description: String::new(),
            price,
            icon: None,
            pricing_type,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn prices_full_route_and_sub_range() {
        let segments = vec![seg("Lagos", "Ibadan", 3000.0), seg("Ibadan", "Abuja", 7000.0)];

        assert_eq!(price_segment_range(&segments, "Lagos", "Abuja"), Some(10000.0));
        assert_eq!(price_segment_range(&segments, "Ibadan", "Abuja"), Some(7000.0));
        assert_eq!(price_segment_range(&segments, "Lagos", "Ibadan"), Some(3000.0));
    }

    #[test]
    fn range_pricing_is_additive() {
        let segments = vec![
            seg("Lagos", "Ibadan", 3000.0),
            seg("Ibadan", "Lokoja", 4000.0),
            seg("Lokoja", "Abuja", 3000.0),
        ];

        let whole = price_segment_range(&segments, "Lagos", "Abuja").unwrap();
        let first = price_segment_range(&segments, "Lagos", "Lokoja").unwrap();
        let rest = price_segment_range(&segments, "Lokoja", "Abuja").unwrap();
        assert_eq!(whole, first + rest);
    }

    #[test]
    fn unknown_or_reversed_range_does_not_match() {
        let segments = vec![seg("Lagos", "Ibadan", 3000.0), seg("Ibadan", "Abuja", 7000.0)];

        assert_eq!(price_segment_range(&segments, "Kano", "Abuja"), None);
        assert_eq!(price_segment_range(&segments, "Lagos", "Jos"), None);
        // Destination occurs before the origin in segment order.
        assert_eq!(price_segment_range(&segments, "Ibadan", "Ibadan"), None);
    }

    #[test]
    fn duplicate_labels_resolve_to_first_occurrence() {
        // A loop route: Lagos appears as origin twice. The engine takes the
        // first match; intended behavior for such routes is undefined
        // upstream, this test just pins the current resolution.
        let segments = vec![
            seg("Lagos", "Ibadan", 3000.0),
            seg("Ibadan", "Lagos", 3000.0),
            seg("Lagos", "Abuja", 9000.0),
        ];

        assert_eq!(find_segment_span(&segments, "Lagos", "Ibadan"), Some((0, 0)));
        assert_eq!(price_segment_range(&segments, "Lagos", "Abuja"), Some(15000.0));
    }

    #[test]
    fn add_on_pricing_by_type() {
        let add_ons = vec![
            add_on("Refreshments", 1000.0, PricingType::PerPassenger),
            add_on("Priority boarding", 500.0, PricingType::PerBooking),
        ];

        assert_eq!(price_add_ons(&add_ons, 2), 2500.0);
        assert_eq!(total_price(5000.0, 2, &add_ons), 12500.0);
    }

    #[test]
    fn search_matching_differs_from_pricing_on_loops() {
        // Search scans destinations only from the matched origin onward, so
        // it accepts a connection the two-scan pricing lookup rejects.
        let segments = vec![seg("Abuja", "Lagos", 5000.0), seg("Lagos", "Abuja", 5000.0)];

        assert!(serves_connection(&segments, "Lagos", "Abuja"));
        assert!(!serves_connection(&segments, "Jos", "Abuja"));
        assert_eq!(price_segment_range(&segments, "Lagos", "Abuja"), None);
    }

    #[test]
    fn reachable_destinations_from_mid_route() {
        let segments = vec![
            seg("Lagos", "Ibadan", 3000.0),
            seg("Ibadan", "Lokoja", 4000.0),
            seg("Lokoja", "Abuja", 3000.0),
        ];

        assert_eq!(
            reachable_destinations(&segments, "Ibadan"),
            vec!["Lokoja".to_string(), "Abuja".to_string()]
        );
        assert!(reachable_destinations(&segments, "Kano").is_empty());
    }

    #[test]
    fn minor_unit_conversion_rounds() {
        assert_eq!(to_minor_units(10000.0), 1_000_000);
        assert_eq!(to_minor_units(99.995), 10000);
        assert!(amounts_match(100.0, 100.005));
        assert!(!amounts_match(100.0, 105.0));
    }
}
