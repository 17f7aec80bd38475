//! Static Resource Type Catalog.
//!
//! The catalog maps `(package_alias, type_identifier)` pairs from Go
//! source to canonical ARM type strings, and back. It is constructed
//! once from the `phf` static tables below and never mutated — see
//! spec.md §3 and §5.

use phf::phf_map;

pub const DEFAULT_API_VERSION: &str = "2021-04-01";

/// Catalog entry: everything known about one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub arm_type: &'static str,
    pub api_version: &'static str,
    pub inverse_package: &'static str,
    pub inverse_type_identifier: &'static str,
}

/// `"<package_alias>.<type_identifier>"` → entry.
static FORWARD: phf::Map<&'static str, CatalogEntry> = phf_map! {
    "storage.StorageAccount" => CatalogEntry {
        arm_type: "Microsoft.Storage/storageAccounts",
        api_version: "2021-04-01",
        inverse_package: "storage",
        inverse_type_identifier: "StorageAccount",
    },
    "compute.VirtualMachine" => CatalogEntry {
        arm_type: "Microsoft.Compute/virtualMachines",
        api_version: "2021-07-01",
        inverse_package: "compute",
        inverse_type_identifier: "VirtualMachine",
    },
    "network.VirtualNetwork" => CatalogEntry {
        arm_type: "Microsoft.Network/virtualNetworks",
        api_version: "2021-05-01",
        inverse_package: "network",
        inverse_type_identifier: "VirtualNetwork",
    },
    "network.PublicIPAddress" => CatalogEntry {
        arm_type: "Microsoft.Network/publicIPAddresses",
        api_version: "2021-05-01",
        inverse_package: "network",
        inverse_type_identifier: "PublicIPAddress",
    },
    "network.NetworkInterface" => CatalogEntry {
        arm_type: "Microsoft.Network/networkInterfaces",
        api_version: "2021-05-01",
        inverse_package: "network",
        inverse_type_identifier: "NetworkInterface",
    },
    "keyvault.Vault" => CatalogEntry {
        arm_type: "Microsoft.KeyVault/vaults",
        api_version: "2021-10-01",
        inverse_package: "keyvault",
        inverse_type_identifier: "Vault",
    },
    "appservice.Plan" => CatalogEntry {
        arm_type: "Microsoft.Web/serverfarms",
        api_version: "2021-02-01",
        inverse_package: "appservice",
        inverse_type_identifier: "Plan",
    },
    "appservice.Site" => CatalogEntry {
        arm_type: "Microsoft.Web/sites",
        api_version: "2021-02-01",
        inverse_package: "appservice",
        inverse_type_identifier: "Site",
    },
};

/// `arm_type` → entry, for the inverse (api version + import) lookups.
static BY_ARM_TYPE: phf::Map<&'static str, CatalogEntry> = phf_map! {
    "Microsoft.Storage/storageAccounts" => CatalogEntry {
        arm_type: "Microsoft.Storage/storageAccounts",
        api_version: "2021-04-01",
        inverse_package: "storage",
        inverse_type_identifier: "StorageAccount",
    },
    "Microsoft.Compute/virtualMachines" => CatalogEntry {
        arm_type: "Microsoft.Compute/virtualMachines",
        api_version: "2021-07-01",
        inverse_package: "compute",
        inverse_type_identifier: "VirtualMachine",
    },
    "Microsoft.Network/virtualNetworks" => CatalogEntry {
        arm_type: "Microsoft.Network/virtualNetworks",
        api_version: "2021-05-01",
        inverse_package: "network",
        inverse_type_identifier: "VirtualNetwork",
    },
    "Microsoft.Network/publicIPAddresses" => CatalogEntry {
        arm_type: "Microsoft.Network/publicIPAddresses",
        api_version: "2021-05-01",
        inverse_package: "network",
        inverse_type_identifier: "PublicIPAddress",
    },
    "Microsoft.Network/networkInterfaces" => CatalogEntry {
        arm_type: "Microsoft.Network/networkInterfaces",
        api_version: "2021-05-01",
        inverse_package: "network",
        inverse_type_identifier: "NetworkInterface",
    },
    "Microsoft.KeyVault/vaults" => CatalogEntry {
        arm_type: "Microsoft.KeyVault/vaults",
        api_version: "2021-10-01",
        inverse_package: "keyvault",
        inverse_type_identifier: "Vault",
    },
    "Microsoft.Web/serverfarms" => CatalogEntry {
        arm_type: "Microsoft.Web/serverfarms",
        api_version: "2021-02-01",
        inverse_package: "appservice",
        inverse_type_identifier: "Plan",
    },
    "Microsoft.Web/sites" => CatalogEntry {
        arm_type: "Microsoft.Web/sites",
        api_version: "2021-02-01",
        inverse_package: "appservice",
        inverse_type_identifier: "Site",
    },
};

/// Module path substring that a `package_alias`'s import must contain
/// to be considered a resource package, guarding against unrelated
/// name collisions (spec.md §4.1).
pub const RESOURCES_MODULE_MARKER: &str = "wetwire-azure-go/resources";

/// The process-wide, immutable catalog. Cheap to construct (it is just
/// a pair of `phf` table references), so no `OnceLock` is needed — but
/// callers that want a single shared handle can still hold one `Catalog`
/// behind an `Arc` if convenient.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl Catalog {
    pub fn new() -> Self {
        Self
    }

    /// Look up `(package_alias, type_identifier)` → ARM type string.
    pub fn lookup(&self, package_alias: &str, type_identifier: &str) -> Option<CatalogEntry> {
        let key = format!("{package_alias}.{type_identifier}");
        FORWARD.get(key.as_str()).copied()
    }

    /// `arm_type` → api version, falling back to [`DEFAULT_API_VERSION`].
    pub fn api_version(&self, arm_type: &str) -> &'static str {
        BY_ARM_TYPE
            .get(arm_type)
            .map(|e| e.api_version)
            .unwrap_or(DEFAULT_API_VERSION)
    }

    /// `arm_type` → `(inverse_package_name, inverse_type_identifier)`,
    /// used by import/code generation.
    pub fn inverse(&self, arm_type: &str) -> Option<(&'static str, &'static str)> {
        BY_ARM_TYPE
            .get(arm_type)
            .map(|e| (e.inverse_package, e.inverse_type_identifier))
    }

    /// All known ARM types, for diagnostics.
    pub fn known_arm_types(&self) -> impl Iterator<Item = &'static str> {
        BY_ARM_TYPE.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_lookup_resolves_storage_account() {
        let catalog = Catalog::new();
        let entry = catalog.lookup("storage", "StorageAccount").unwrap();
        assert_eq!(entry.arm_type, "Microsoft.Storage/storageAccounts");
    }

    #[test]
    fn unknown_pair_is_none() {
        let catalog = Catalog::new();
        assert!(catalog.lookup("nope", "Nothing").is_none());
    }

    #[test]
    fn api_version_falls_back_to_default() {
        let catalog = Catalog::new();
        assert_eq!(
            catalog.api_version("Microsoft.DoesNotExist/thing"),
            DEFAULT_API_VERSION
        );
        assert_eq!(
            catalog.api_version("Microsoft.Storage/storageAccounts"),
            "2021-04-01"
        );
    }

    #[test]
    fn inverse_roundtrips_forward() {
        let catalog = Catalog::new();
        let entry = catalog.lookup("compute", "VirtualMachine").unwrap();
        let (pkg, ty) = catalog.inverse(entry.arm_type).unwrap();
        assert_eq!(pkg, "compute");
        assert_eq!(ty, "VirtualMachine");
    }
}
