//! Property tests for registration record validation and rendering.

use proptest::prelude::*;

use fleetup::RegistrationRecord;

fn field() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9][A-Za-z0-9 ._:-]{0,30}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Valid inputs always build, and rendering is a pure function of them.
    #[test]
    fn property_render_is_deterministic(
        group in field(),
        subgroup in field(),
        token in field(),
        address in field(),
        port in 1u16..,
    ) {
        let a = RegistrationRecord::new(&group, &subgroup, &token, &address, port).unwrap();
        let b = RegistrationRecord::new(&group, &subgroup, &token, &address, port).unwrap();
        prop_assert_eq!(a.render(), b.render());

        let rendered = a.render();
        let lines: Vec<&str> = rendered.lines().collect();
        prop_assert_eq!(lines.len(), 6);
        prop_assert_eq!(lines[0], "Registration:");
        prop_assert_eq!(lines[1].to_string(), format!("    groupName: {}", group));
        prop_assert_eq!(lines[3].to_string(), format!("    token: {}", token));
        prop_assert_eq!(lines[5].to_string(), format!("    remotePort: {}", port));
    }

    /// PROPERTY: A line break anywhere in a field is rejected.
    #[test]
    fn property_multiline_fields_are_rejected(
        head in field(),
        tail in field(),
        which in 0usize..4,
        brk in prop_oneof![Just("\n"), Just("\r"), Just("\r\n")],
    ) {
        let bad = format!("{}{}{}", head, brk, tail);
        let mut fields = ["lab".to_string(), "east".to_string(), "tok".to_string(), "10.0.0.1".to_string()];
        fields[which] = bad;

        let result = RegistrationRecord::new(&fields[0], &fields[1], &fields[2], &fields[3], 443);
        prop_assert!(result.is_err());
    }
}

#[test]
fn zero_port_is_rejected() {
    assert!(RegistrationRecord::new("lab", "east", "tok", "10.0.0.1", 0).is_err());
}
