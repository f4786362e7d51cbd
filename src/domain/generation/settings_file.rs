//! Rendering of the `.env` settings file.

use std::collections::BTreeSet;

use crate::domain::catalog::ServiceId;
use crate::domain::state::globals::global_keys;
use crate::domain::state::{ConfigValues, namespace_owner};
use crate::ports::ServiceCatalog;

pub const SETTINGS_PATH: &str = ".env";

/// Value written for a generated secret that has not been generated yet.
pub const SECRET_SENTINEL: &str = "CHANGE_ME";

const HEADER: &str = "# JELLYSERV v6 ENV\n# Generated by jellyserv. Contains secrets: keep it private.\n";

/// One `KEY=value` line per variable.
///
/// Globals come first, then the fields of the effective services in identifier
/// order and declaration order, then keys no catalog field declares. The first
/// occurrence of a key wins. Fields whose condition does not hold are omitted.
pub fn render<C: ServiceCatalog>(
    effective: &BTreeSet<ServiceId>,
    values: &ConfigValues,
    catalog: &C,
) -> String {
    let mut written: BTreeSet<String> = BTreeSet::new();
    let mut out = String::from(HEADER);
    let mut line = |out: &mut String, key: &str, value: &str| {
        if written.insert(key.to_string()) {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
    };

    out.push_str("\n# Global\n");
    for key in global_keys() {
        let value = values.get(key).map(ToString::to_string).unwrap_or_default();
        line(&mut out, key, &value);
    }

    for id in effective {
        let Some(service) = catalog.get(id) else {
            continue;
        };
        let active: Vec<_> = service.fields.iter().filter(|field| field.is_active(values)).collect();
        if active.is_empty() {
            continue;
        }
        out.push_str(&format!("\n# {}\n", service.name));
        for field in active {
            let value = match values.get(field.key()) {
                Some(value) if !(field.generator && value.is_blank()) => value.to_string(),
                _ if field.generator => SECRET_SENTINEL.to_string(),
                _ => field.default.clone().unwrap_or_default(),
            };
            line(&mut out, field.key(), &value);
        }
    }

    let declared: BTreeSet<&str> = catalog
        .list_all()
        .into_iter()
        .flat_map(|service| service.field_keys().collect::<Vec<_>>())
        .collect();
    let custom: Vec<(&str, String)> = values
        .iter()
        .filter(|(key, _)| !declared.contains(key) && namespace_owner(key).is_none())
        .filter(|(key, _)| !global_keys().any(|global| global == *key))
        .map(|(key, value)| (key, value.to_string()))
        .collect();
    if !custom.is_empty() {
        out.push_str("\n# Custom\n");
        for (key, value) in custom {
            line(&mut out, key, &value);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{FieldCondition, SettingsField};
    use crate::domain::state::ConfigValue;
    use crate::domain::state::globals::initial_values;
    use crate::testing::TestCatalog;

    fn ids(values: &[&str]) -> BTreeSet<ServiceId> {
        values.iter().map(|value| ServiceId::new(value).unwrap()).collect()
    }

    fn lines(rendered: &str) -> Vec<&str> {
        rendered.lines().filter(|line| !line.is_empty() && !line.starts_with('#')).collect()
    }

    fn vpn_catalog() -> TestCatalog {
        TestCatalog::new()
            .service("gluetun", &[])
            .describe("gluetun", |s| {
                s.fields.push(SettingsField {
                    name: "VPN_TYPE".into(),
                    default: Some("openvpn".into()),
                    ..Default::default()
                });
                s.fields.push(SettingsField {
                    name: "OPENVPN_USER".into(),
                    condition: Some(FieldCondition {
                        field: "VPN_TYPE".into(),
                        equals: "openvpn".into(),
                    }),
                    ..Default::default()
                });
            })
            .service("db", &[])
            .describe("db", |s| {
                s.fields.push(TestCatalog::secret("DB_PASS"));
                s.fields.push(SettingsField {
                    name: "TZ".into(),
                    default: Some("UTC".into()),
                    ..Default::default()
                });
            })
    }

    #[test]
    fn globals_come_first_in_fixed_order() {
        let rendered = render(&BTreeSet::new(), &initial_values(), &vpn_catalog());
        let keys: Vec<&str> =
            lines(&rendered).into_iter().filter_map(|line| line.split('=').next()).collect();

        assert!(rendered.starts_with("# JELLYSERV v6 ENV\n"));
        assert_eq!(&keys[..3], &["DOMAIN", "ACME_EMAIL", "TZ"]);
        assert_eq!(keys.len(), global_keys().count());
    }

    #[test]
    fn missing_secret_gets_sentinel() {
        let rendered = render(&ids(&["db"]), &initial_values(), &vpn_catalog());
        assert!(lines(&rendered).contains(&"DB_PASS=CHANGE_ME"));
    }

    #[test]
    fn first_declaration_wins() {
        let rendered = render(&ids(&["db"]), &initial_values(), &vpn_catalog());
        let tz: Vec<&str> =
            lines(&rendered).into_iter().filter(|line| line.starts_with("TZ=")).collect();
        assert_eq!(tz, vec!["TZ=Europe/Paris"]);
    }

    #[test]
    fn conditional_fields_follow_values() {
        let catalog = vpn_catalog();
        let mut values = initial_values();
        values.set("VPN_TYPE", ConfigValue::text("openvpn"));
        values.set("OPENVPN_USER", ConfigValue::text("me"));

        let rendered = render(&ids(&["gluetun"]), &values, &catalog);
        assert!(lines(&rendered).contains(&"OPENVPN_USER=me"));

        values.set("VPN_TYPE", ConfigValue::text("wireguard"));
        let rendered = render(&ids(&["gluetun"]), &values, &catalog);
        assert!(!rendered.contains("OPENVPN_USER"));
        assert!(lines(&rendered).contains(&"VPN_TYPE=wireguard"));
    }

    #[test]
    fn literal_values_round_trip() {
        let mut values = initial_values();
        values.set("DOMAIN", ConfigValue::text("home.example.net"));
        values.set("DB_PASS", ConfigValue::text("p@ss w0rd=#x"));

        let rendered = render(&ids(&["db"]), &values, &vpn_catalog());

        assert!(lines(&rendered).contains(&"DOMAIN=home.example.net"));
        assert!(lines(&rendered).contains(&"DB_PASS=p@ss w0rd=#x"));
    }

    #[test]
    fn custom_keys_are_appended_and_namespaced_keys_skipped() {
        let mut values = initial_values();
        values.set("EXTRA_FLAG", ConfigValue::Flag(true));
        values.set("db_expose_traefik", ConfigValue::Flag(false));

        let rendered = render(&ids(&["db"]), &values, &vpn_catalog());

        assert!(lines(&rendered).contains(&"EXTRA_FLAG=true"));
        assert!(!rendered.contains("db_expose_traefik"));
        assert!(rendered.contains("\n# Custom\n"));
    }
}
