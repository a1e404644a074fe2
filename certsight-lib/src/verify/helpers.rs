//! Small helpers shared by the chain checks.

use crate::fields::DistinguishedName;

/// A short human-readable identifier for a certificate subject.
///
/// Tries CN, then O, then OU. Falls back to "Unknown".
pub(crate) fn short_name(dn: &DistinguishedName) -> String {
    [&dn.common_name, &dn.organization, &dn.organizational_unit]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_common_name() {
        let dn = DistinguishedName {
            common_name: Some("leaf".into()),
            organization: Some("Org".into()),
            ..DistinguishedName::default()
        };
        assert_eq!(short_name(&dn), "leaf");
    }

    #[test]
    fn falls_back_through_org_units() {
        let dn = DistinguishedName {
            common_name: Some(String::new()),
            organizational_unit: Some("Unit".into()),
            ..DistinguishedName::default()
        };
        assert_eq!(short_name(&dn), "Unit");
        assert_eq!(short_name(&DistinguishedName::default()), "Unknown");
    }
}
