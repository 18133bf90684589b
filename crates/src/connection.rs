//! Vault records -> exportable connections -> TablePlus connection schema.

use crate::error::{Error, Result};
use crate::ui::{Group, Item};
use crate::vault::{Vault, VaultItem};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvailableConnection {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub address: String,
    pub port: i64,
    pub username: String,
    pub password: String,
}

/// One group per vault; one connection per item that carries all of
/// hostname, port, username and password. The first usable field of each id wins.
pub fn parse_available_connections(
    items: &[VaultItem],
    vaults: &[Vault],
) -> (Vec<AvailableConnection>, Vec<Group>) {
    let groups = vaults
        .iter()
        .map(|v| Group {
            id: v.id.clone(),
            name: v.name.clone(),
            description: String::new(),
        })
        .collect();

    let mut out = Vec::new();
    for item in items {
        let mut address = None;
        let mut port = None;
        let mut username = None;
        let mut password = None;
        for f in &item.fields {
            match f.id.as_str() {
                "hostname" if address.is_none() => address = Some(f.value.clone()),
                "port" if port.is_none() => port = f.value.trim().parse::<i64>().ok(),
                "username" if username.is_none() => username = Some(f.value.clone()),
                "password" if password.is_none() => password = Some(f.value.clone()),
                _ => {}
            }
        }
        let (Some(address), Some(port), Some(username), Some(password)) =
            (address, port, username, password)
        else {
            tracing::debug!(id = %item.id, title = %item.title, "skipping incomplete database item");
            continue;
        };
        out.push(AvailableConnection {
            id: item.id.clone(),
            group_id: item.vault.id.clone(),
            name: item.title.clone(),
            address,
            port,
            username,
            password,
        });
    }
    (out, groups)
}

// Checklist entries, all pre-selected.
pub fn selectable_items(connections: &[AvailableConnection]) -> Vec<Item> {
    connections
        .iter()
        .map(|c| {
            Item::new(c.id.clone(), c.name.clone())
                .with_description(c.address.clone())
                .in_group(c.group_id.clone())
                .selected(true)
        })
        .collect()
}

// Connections whose id was picked, in input order.
pub fn retain_selected(
    connections: Vec<AvailableConnection>,
    selected: &[Item],
) -> Vec<AvailableConnection> {
    connections
        .into_iter()
        .filter(|c| selected.iter().any(|it| it.id == c.id))
        .collect()
}

/// A TablePlus connection entry. Key names (typos included) are what
/// TablePlus reads back.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OutputConnection {
    pub database_type: String,
    pub tls_key_name: String,
    #[serde(rename = "isUsePrivateKey")]
    pub is_use_private_key: i64,
    pub limit_query_rows_returned: i64,
    pub startup_commands: String,
    pub recently_opened: Vec<String>,
    pub database_socket: String,
    pub database_user: String,
    pub server_address: String,
    pub tls_key_paths: Vec<String>,
    #[serde(rename = "statusColor")]
    pub status_color: String,
    pub database_encoding: String,
    pub server_user: String,
    pub recent_used_backup_options: Vec<String>,
    pub show_system_schemas: i64,
    pub enviroment: String,
    pub database_path: String,
    pub driver_version: i64,
    pub driver: String,
    pub advanced_safe_mode_level: i64,
    pub hide_function_section: i64,
    pub limit_rows_returned: i64,
    pub connection_name: String,
    pub database_warehouse: String,
    pub other_options: Vec<String>,
    pub server_password_mode: i64,
    #[serde(rename = "isUseSocket")]
    pub is_use_socket: i64,
    #[serde(rename = "tLSMode")]
    pub tls_mode: i64,
    pub show_recently_section: i64,
    pub section_states: Map<String, Value>,
    pub favorites: Map<String, Value>,
    #[serde(rename = "isOverSSH")]
    pub is_over_ssh: i64,
    pub server_password: String,
    pub server_port: String,
    pub database_port: String,
    pub database_host: String,
    pub database_name: String,
    pub recently_schema: Vec<String>,
    pub recent_used_backup_driver_name: String,
    pub recent_used_backup_gzip: i64,
    pub recent_used_restore_options: Vec<String>,
    pub authenticator: String,
    pub database_user_role: String,
    pub database_password: String,
    pub database_password_mode: i64,
    pub server_private_key_name: String,
    pub database_key_password: String,
    pub safe_mode_level: i64,
    pub read_intent_only: i64,
}

impl From<&AvailableConnection> for OutputConnection {
    fn from(c: &AvailableConnection) -> Self {
        OutputConnection {
            database_user: c.username.clone(),
            server_address: c.address.clone(),
            database_host: c.address.clone(),
            connection_name: c.name.clone(),
            database_password: c.password.clone(),
            database_port: c.port.to_string(),

            // TODO: read driver and environment from the vault item instead of assuming local PostgreSQL
            driver: "PostgreSQL".to_string(),
            enviroment: "local".to_string(),
            status_color: "#007F3D".to_string(),
            server_port: "22".to_string(),
            tls_key_name: "Key...,Cert...,CA Cert...".to_string(),
            tls_key_paths: vec![String::new(); 3],
            server_private_key_name: "Import a private key...".to_string(),
            ..Default::default()
        }
    }
}

pub fn convert_connections(connections: &[AvailableConnection]) -> Vec<OutputConnection> {
    connections.iter().map(OutputConnection::from).collect()
}

// Pretty JSON (two-space indent), the plaintext of the export file.
pub fn to_json(connections: &[OutputConnection]) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(connections).map_err(|e| Error::json("export", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::Field;

    fn field(id: &str, value: &str) -> Field {
        Field {
            id: id.into(),
            label: id.into(),
            value: value.into(),
        }
    }

    fn db_item(id: &str, vault: &str, fields: Vec<Field>) -> VaultItem {
        VaultItem {
            id: id.into(),
            title: format!("{id} db"),
            category: "DATABASE".into(),
            vault: Vault {
                id: vault.into(),
                name: String::new(),
            },
            fields,
        }
    }

    fn complete(id: &str, vault: &str) -> VaultItem {
        db_item(
            id,
            vault,
            vec![
                field("hostname", "db.internal"),
                field("port", "5432"),
                field("username", "app"),
                field("password", "s3cret"),
            ],
        )
    }

    #[test]
    fn complete_items_become_connections() {
        let vaults = vec![Vault {
            id: "v1".into(),
            name: "Work".into(),
        }];
        let (conns, groups) = parse_available_connections(&[complete("a", "v1")], &vaults);
        assert_eq!(
            groups,
            vec![Group {
                id: "v1".into(),
                name: "Work".into(),
                description: String::new()
            }]
        );
        assert_eq!(
            conns,
            vec![AvailableConnection {
                id: "a".into(),
                group_id: "v1".into(),
                name: "a db".into(),
                address: "db.internal".into(),
                port: 5432,
                username: "app".into(),
                password: "s3cret".into(),
            }]
        );
    }

    #[test]
    fn incomplete_items_are_skipped() {
        let missing_password = db_item(
            "b",
            "v1",
            vec![field("hostname", "h"), field("port", "1"), field("username", "u")],
        );
        let bad_port = db_item(
            "c",
            "v1",
            vec![
                field("hostname", "h"),
                field("port", "not-a-port"),
                field("username", "u"),
                field("password", "p"),
            ],
        );
        let (conns, _) = parse_available_connections(&[missing_password, bad_port, complete("a", "v1")], &[]);
        let ids: Vec<&str> = conns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn first_field_wins_and_later_port_can_fill_in() {
        let item = db_item(
            "a",
            "v1",
            vec![
                field("hostname", "first"),
                field("hostname", "second"),
                field("port", "oops"),
                field("port", "6543"),
                field("username", "u"),
                field("password", "p"),
            ],
        );
        let (conns, _) = parse_available_connections(&[item], &[]);
        assert_eq!(conns[0].address, "first");
        assert_eq!(conns[0].port, 6543);
    }

    #[test]
    fn checklist_round_trip_keeps_input_order() {
        let (conns, _) = parse_available_connections(&[complete("a", "v1"), complete("b", "v1"), complete("c", "v2")], &[]);
        let items = selectable_items(&conns);
        assert!(items.iter().all(|it| it.selected));
        assert_eq!(items[2].group_id, "v2");
        assert_eq!(items[0].description, "db.internal");
        let picked = vec![items[2].clone(), items[0].clone()];
        let kept: Vec<String> = retain_selected(conns, &picked).into_iter().map(|c| c.id).collect();
        assert_eq!(kept, vec!["a", "c"]);
    }

    #[test]
    fn output_uses_tableplus_keys_and_defaults() {
        let (conns, _) = parse_available_connections(&[complete("a", "v1")], &[]);
        let json = to_json(&convert_connections(&conns)).unwrap();
        let value: Value = serde_json::from_slice(&json).unwrap();
        let entry = &value[0];
        assert_eq!(entry["ConnectionName"], "a db");
        assert_eq!(entry["DatabaseHost"], "db.internal");
        assert_eq!(entry["ServerAddress"], "db.internal");
        assert_eq!(entry["DatabasePort"], "5432");
        assert_eq!(entry["DatabaseUser"], "app");
        assert_eq!(entry["DatabasePassword"], "s3cret");
        assert_eq!(entry["Driver"], "PostgreSQL");
        assert_eq!(entry["Enviroment"], "local");
        assert_eq!(entry["statusColor"], "#007F3D");
        assert_eq!(entry["ServerPort"], "22");
        assert_eq!(entry["TlsKeyPaths"], serde_json::json!(["", "", ""]));
        assert_eq!(entry["isOverSSH"], 0);
        assert_eq!(entry["tLSMode"], 0);
        assert_eq!(entry["SectionStates"], serde_json::json!({}));
        assert_eq!(entry["RecentlyOpened"], serde_json::json!([]));
        assert_eq!(entry.as_object().map(|o| o.len()), Some(49));
        // two-space indentation
        assert!(String::from_utf8(json).unwrap().contains("\n    \"DatabaseType\": \"\""));
    }
}
