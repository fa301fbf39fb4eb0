use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::{FetchState, PageContext};
use crate::errors::AppError;
use crate::models::Resource;

pub const DIFFICULTIES: [&str; 3] = ["Beginner", "Intermediate", "Advanced"];
pub const KINDS: [&str; 4] = ["Course", "Tutorial", "Video", "Article"];

/// One dropdown of the filter bar. `All` places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    fn admits(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl FromStr for Choice {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Choice::All)
        } else {
            Ok(Choice::Only(s.to_string()))
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("All"),
            Choice::Only(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub search: String,
    pub difficulty: Choice,
    pub kind: Choice,
}

impl ResourceFilter {
    /// Case-insensitive text match on title, description or any skill tag,
    /// AND exact difficulty, AND exact type.
    pub fn matches(&self, resource: &Resource) -> bool {
        self.matches_search(resource)
            && self.difficulty.admits(&resource.difficulty)
            && self.kind.admits(&resource.kind)
    }

    /// The needle is used verbatim, so surrounding spaces must match too.
    fn matches_search(&self, resource: &Resource) -> bool {
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        resource.title.to_lowercase().contains(&needle)
            || resource.description.to_lowercase().contains(&needle)
            || resource
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(&needle))
    }
}

pub fn filter_resources<'r>(resources: &'r [Resource], filter: &ResourceFilter) -> Vec<&'r Resource> {
    resources.iter().filter(|r| filter.matches(r)).collect()
}

#[derive(Debug, Default)]
pub struct ResourcesPage {
    resources: FetchState<Vec<Resource>>,
    filter: ResourceFilter,
}

impl ResourcesPage {
    pub async fn mount(&mut self, ctx: &mut PageContext<'_>) -> Result<(), AppError> {
        self.resources.begin_load()?;
        match ctx.api().resources().await {
            Ok(resources) => self.resources.settle(resources),
            Err(e) => {
                self.resources.fail();
                ctx.report(&e, "Failed to load resources");
            }
        }
        Ok(())
    }

    pub fn filter(&self) -> &ResourceFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: ResourceFilter) {
        self.filter = filter;
    }

    pub fn total(&self) -> usize {
        self.resources.data().map_or(0, Vec::len)
    }

    /// Recomputed from the loaded list on every call.
    pub fn visible(&self) -> Vec<&Resource> {
        let all = self.resources.data().map(Vec::as_slice).unwrap_or_default();
        filter_resources(all, &self.filter)
    }
}
