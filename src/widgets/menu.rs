use serde::{Deserialize, Serialize};

use crate::error::{InstantSearchError, Result};

pub const DEFAULT_LIMIT_MIN: usize = 10;
pub const DEFAULT_LIMIT_MAX: usize = 20;

/// Theme class names the Menu widget exposes.
pub mod theme {
    pub const ROOT: &str = "ais-Menu__root";
    pub const ITEMS: &str = "ais-Menu__items";
    pub const ITEM: &str = "ais-Menu__item";
    pub const ITEM_LINK: &str = "ais-Menu__itemLink";
    pub const ITEM_LINK_SELECTED: &str = "ais-Menu__itemLinkSelected";
    pub const ITEM_LABEL: &str = "ais-Menu__itemLabel";
    pub const ITEM_LABEL_SELECTED: &str = "ais-Menu__itemLabelSelected";
    pub const ITEM_COUNT: &str = "ais-Menu__itemCount";
    pub const ITEM_COUNT_SELECTED: &str = "ais-Menu__itemCountSelected";
    pub const NO_REFINEMENT: &str = "ais-Menu__noRefinement";
    pub const SHOW_MORE: &str = "ais-Menu__showMore";
    pub const SEARCH_BOX: &str = "ais-Menu__SearchBox";
}

/// Translation keys the Menu widget looks up.
pub mod translations {
    /// Takes one argument: whether the list is currently expanded.
    pub const SHOW_MORE: &str = "showMore";
    pub const NO_RESULTS: &str = "noResults";
}

/// Props of the Menu widget: a single-value refinement list on one attribute.
///
/// The attribute must be declared for faceting on the index, and searchable
/// for faceting when `with_search_box` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuProps {
    pub attribute_name: String,
    #[serde(default)]
    pub show_more: bool,
    #[serde(default = "default_limit_min")]
    pub limit_min: usize,
    #[serde(default = "default_limit_max")]
    pub limit_max: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_refinement: Option<String>,
    #[serde(default)]
    pub with_search_box: bool,
}

fn default_limit_min() -> usize {
    DEFAULT_LIMIT_MIN
}

fn default_limit_max() -> usize {
    DEFAULT_LIMIT_MAX
}

impl MenuProps {
    pub fn new(attribute_name: impl Into<String>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            show_more: false,
            limit_min: DEFAULT_LIMIT_MIN,
            limit_max: DEFAULT_LIMIT_MAX,
            default_refinement: None,
            with_search_box: false,
        }
    }

    /// Number of items displayed: `limit_max` once "show more" is enabled.
    pub fn effective_limit(&self) -> usize {
        if self.show_more {
            self.limit_max
        } else {
            self.limit_min
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.attribute_name.trim().is_empty() {
            return Err(InstantSearchError::Config(
                "Menu requires a non-empty attribute_name".to_string(),
            ));
        }
        if self.show_more && self.limit_min > self.limit_max {
            return Err(InstantSearchError::Config(format!(
                "Menu limit_min ({}) exceeds limit_max ({})",
                self.limit_min, self.limit_max
            )));
        }
        Ok(())
    }
}
