use serde::{Deserialize, Serialize};

use opsdesk_core::{DomainError, DomainResult, Entity, EntityId, TenantId};

/// Product identifier (tenant-scoped via the `tenant_id` field on the entity).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A named group of mutually exclusive options (e.g. "size": S/M/L).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOptionGroup {
    pub name: String,
    pub options: Vec<String>,
}

/// Product entity: descriptive attributes plus the option groups that drive
/// variant generation. Passed by value into the creation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub tenant_id: TenantId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub option_groups: Vec<ProductOptionGroup>,
}

impl Product {
    /// Validate the product as variant-generation input.
    ///
    /// This runs before any variant is written, so a failing product leaves
    /// the store untouched.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if self.code.trim().is_empty() {
            return Err(DomainError::validation("product code cannot be empty"));
        }
        for group in &self.option_groups {
            if group.name.trim().is_empty() {
                return Err(DomainError::validation("option group name cannot be empty"));
            }
            for option in &group.options {
                if option.trim().is_empty() {
                    return Err(DomainError::validation(format!(
                        "option group '{}' contains an empty option",
                        group.name
                    )));
                }
            }
            let mut seen = std::collections::HashSet::new();
            for option in &group.options {
                if !seen.insert(option.as_str()) {
                    return Err(DomainError::validation(format!(
                        "option group '{}' contains duplicate option '{}'",
                        group.name, option
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_groups(groups: Vec<ProductOptionGroup>) -> Product {
        Product {
            id: ProductId::new(EntityId::new()),
            tenant_id: TenantId::new(),
            name: "Shirt".to_string(),
            code: "SHIRT-01".to_string(),
            option_groups: groups,
        }
    }

    #[test]
    fn accepts_a_plain_product_without_options() {
        assert!(product_with_groups(vec![]).validate().is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let mut p = product_with_groups(vec![]);
        p.name = "   ".to_string();
        assert!(matches!(p.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn rejects_empty_code() {
        let mut p = product_with_groups(vec![]);
        p.code = String::new();
        assert!(matches!(p.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn rejects_blank_group_name() {
        let p = product_with_groups(vec![ProductOptionGroup {
            name: " ".to_string(),
            options: vec!["red".to_string()],
        }]);
        assert!(matches!(p.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn rejects_empty_option_value() {
        let p = product_with_groups(vec![ProductOptionGroup {
            name: "color".to_string(),
            options: vec!["red".to_string(), "".to_string()],
        }]);
        assert!(matches!(p.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn rejects_duplicate_option_values() {
        let p = product_with_groups(vec![ProductOptionGroup {
            name: "color".to_string(),
            options: vec!["red".to_string(), "red".to_string()],
        }]);
        assert!(matches!(p.validate(), Err(DomainError::Validation(_))));
    }
}
