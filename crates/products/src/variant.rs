use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use opsdesk_core::{Entity, EntityId, TenantId};

use crate::product::{ProductId, ProductOptionGroup};

/// Product variant identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductVariantId(pub EntityId);

impl ProductVariantId {
    pub fn new() -> Self {
        Self(EntityId::new())
    }
}

impl Default for ProductVariantId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ProductVariantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One chosen option within a variant (e.g. group "size", value "M").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    pub group: String,
    pub value: String,
}

/// A purchasable configuration of a product.
///
/// Belongs to exactly one product and one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: ProductVariantId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub options: Vec<VariantOption>,
    pub created_at: DateTime<Utc>,
}

impl Entity for ProductVariant {
    type Id = ProductVariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Enumerate the variant option combinations implied by `groups`.
///
/// The result is the cartesian product of all non-empty groups, in declared
/// group order. Groups without options contribute nothing. A product with no
/// (non-empty) groups yields a single empty combination: the base variant.
pub fn variant_combinations(groups: &[ProductOptionGroup]) -> Vec<Vec<VariantOption>> {
    let mut combinations: Vec<Vec<VariantOption>> = vec![Vec::new()];

    for group in groups.iter().filter(|g| !g.options.is_empty()) {
        let mut next = Vec::with_capacity(combinations.len() * group.options.len());
        for combination in &combinations {
            for option in &group.options {
                let mut extended = combination.clone();
                extended.push(VariantOption {
                    group: group.name.clone(),
                    value: option.clone(),
                });
                next.push(extended);
            }
        }
        combinations = next;
    }

    combinations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, options: &[&str]) -> ProductOptionGroup {
        ProductOptionGroup {
            name: name.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn no_groups_yields_one_base_combination() {
        let combos = variant_combinations(&[]);
        assert_eq!(combos, vec![Vec::new()]);
    }

    #[test]
    fn single_group_yields_one_combination_per_option() {
        let combos = variant_combinations(&[group("size", &["S", "M", "L"])]);
        assert_eq!(combos.len(), 3);
        assert_eq!(combos[1][0].value, "M");
    }

    #[test]
    fn two_groups_yield_the_cartesian_product() {
        let combos = variant_combinations(&[
            group("size", &["S", "M"]),
            group("color", &["red", "blue", "green"]),
        ]);
        assert_eq!(combos.len(), 6);

        // Declared group order is preserved within each combination.
        for combo in &combos {
            assert_eq!(combo[0].group, "size");
            assert_eq!(combo[1].group, "color");
        }
    }

    #[test]
    fn empty_groups_are_skipped() {
        let combos = variant_combinations(&[
            group("size", &["S", "M"]),
            group("material", &[]),
        ]);
        assert_eq!(combos.len(), 2);
        assert!(combos.iter().all(|c| c.len() == 1));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_groups() -> impl Strategy<Value = Vec<ProductOptionGroup>> {
            proptest::collection::vec(
                ("[a-z]{1,8}", proptest::collection::vec("[a-z0-9]{1,6}", 0..4)),
                0..4,
            )
            .prop_map(|raw| {
                raw.into_iter()
                    .map(|(name, options)| ProductOptionGroup { name, options })
                    .collect()
            })
        }

        proptest! {
            /// Combination count is the product of non-empty group sizes.
            #[test]
            fn count_is_product_of_group_sizes(groups in arb_groups()) {
                let expected: usize = groups
                    .iter()
                    .filter(|g| !g.options.is_empty())
                    .map(|g| g.options.len())
                    .product();

                prop_assert_eq!(variant_combinations(&groups).len(), expected);
            }

            /// Every combination picks exactly one option from each non-empty group.
            #[test]
            fn each_combination_covers_every_nonempty_group(groups in arb_groups()) {
                let nonempty: Vec<&ProductOptionGroup> =
                    groups.iter().filter(|g| !g.options.is_empty()).collect();

                for combo in variant_combinations(&groups) {
                    prop_assert_eq!(combo.len(), nonempty.len());
                    for (chosen, group) in combo.iter().zip(&nonempty) {
                        prop_assert_eq!(&chosen.group, &group.name);
                        prop_assert!(group.options.contains(&chosen.value));
                    }
                }
            }
        }
    }
}
