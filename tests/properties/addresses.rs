//! Property tests for address list parsing and endpoint host extraction.

use proptest::prelude::*;

use fleetup::domain::entities::parse_address_list;
use fleetup::presentation::factory::remote_host;

fn ipv4() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
}

fn padding() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ ]{0,3}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing keeps order, trims whitespace and drops empty entries.
    #[test]
    fn property_address_list_keeps_non_empty_entries(
        entries in proptest::collection::vec((padding(), prop::option::of(ipv4()), padding()), 0..8),
    ) {
        let raw = entries
            .iter()
            .map(|(l, ip, r)| format!("{}{}{}", l, ip.clone().unwrap_or_default(), r))
            .collect::<Vec<_>>()
            .join(",");
        let expected: Vec<String> = entries.iter().filter_map(|(_, ip, _)| ip.clone()).collect();

        let parsed = parse_address_list(&raw);
        prop_assert_eq!(&parsed, &expected);

        // Re-joining and parsing again is a fixed point.
        prop_assert_eq!(parse_address_list(&parsed.join(",")), parsed);
    }

    /// PROPERTY: Spaces and commas are interchangeable separators.
    #[test]
    fn property_address_list_splits_on_any_separator(
        ips in proptest::collection::vec(ipv4(), 0..8),
        separators in proptest::collection::vec(prop_oneof![Just(","), Just(" "), Just(", "), Just("  ")], 8),
    ) {
        let mut raw = String::new();
        for (i, ip) in ips.iter().enumerate() {
            if i > 0 {
                raw.push_str(separators[i % separators.len()]);
            }
            raw.push_str(ip);
        }
        prop_assert_eq!(parse_address_list(&raw), ips);
    }

    /// PROPERTY: The host survives any scheme, port or path around it.
    #[test]
    fn property_remote_host_strips_url_parts(
        ip in ipv4(),
        scheme in prop_oneof![Just(""), Just("https://"), Just("http://")],
        port in prop::option::of(1u16..),
        path in prop_oneof![Just(""), Just("/"), Just("/api/v1.2/system")],
    ) {
        let port = port.map(|p| format!(":{}", p)).unwrap_or_default();
        let endpoint = format!("{}{}{}{}", scheme, ip, port, path);
        prop_assert_eq!(remote_host(&endpoint), ip);
    }
}
