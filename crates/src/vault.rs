//! Database records from 1Password, read through the `op` CLI.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::process::Command;

pub const DATABASE_CATEGORY: &str = "DATABASE";

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Vault {
    pub id: String,
    #[serde(default, alias = "title")]
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ItemOverview {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct VaultItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub vault: Vault,
    #[serde(default)]
    pub fields: Vec<Field>,
}

pub trait VaultSource {
    fn vaults(&self) -> Result<Vec<Vault>>;
    fn items(&self, vault: &Vault) -> Result<Vec<ItemOverview>>;
    fn item(&self, vault: &Vault, id: &str) -> Result<VaultItem>;
}

/// Every database item across all vaults, plus the vaults that hold at least
/// one of them. Items come out clustered by vault.
pub fn fetch_database_items(source: &dyn VaultSource) -> Result<(Vec<VaultItem>, Vec<Vault>)> {
    let mut items = Vec::new();
    let mut vaults = Vec::new();
    for vault in source.vaults()? {
        let ids: Vec<String> = source
            .items(&vault)?
            .into_iter()
            .filter(|it| it.category == DATABASE_CATEGORY)
            .map(|it| it.id)
            .collect();
        tracing::debug!(vault = %vault.id, databases = ids.len(), "listed vault");
        if ids.is_empty() {
            continue;
        }
        for id in &ids {
            let mut item = source.item(&vault, id)?;
            if item.vault.id.is_empty() {
                item.vault = vault.clone();
            }
            items.push(item);
        }
        vaults.push(vault);
    }
    tracing::info!(items = items.len(), vaults = vaults.len(), "fetched database items");
    Ok((items, vaults))
}

pub struct OpCli {
    account: String,
}

impl OpCli {
    pub fn new(account: &str) -> Result<Self> {
        if account.trim().is_empty() {
            return Err(Error::MissingAccount);
        }
        which::which("op").map_err(|e| Error::Vault(format!("1Password CLI `op` not found: {e}")))?;
        Ok(OpCli {
            account: account.to_string(),
        })
    }

    fn run_op(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("op");
        cmd.args(args)
            .arg("--account")
            .arg(&self.account)
            .arg("--format")
            .arg("json");
        let out = cmd
            .output()
            .map_err(|e| Error::Vault(format!("op {args:?} failed to run: {e}")))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr).to_string();
            return Err(Error::Vault(format!("op {:?} failed: {}", args, stderr.trim())));
        }
        Ok(String::from_utf8_lossy(&out.stdout).to_string())
    }
}

fn parse<T: DeserializeOwned>(what: &str, s: &str) -> Result<T> {
    serde_json::from_str(s).map_err(|e| Error::json(what, e))
}

impl VaultSource for OpCli {
    fn vaults(&self) -> Result<Vec<Vault>> {
        parse("vault list", &self.run_op(&["vault", "list"])?)
    }

    fn items(&self, vault: &Vault) -> Result<Vec<ItemOverview>> {
        let out = self.run_op(&["item", "list", "--vault", &vault.id, "--categories", "Database"])?;
        parse("item list", &out)
    }

    fn item(&self, vault: &Vault, id: &str) -> Result<VaultItem> {
        parse("item", &self.run_op(&["item", "get", id, "--vault", &vault.id])?)
    }
}
