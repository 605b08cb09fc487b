//! Query - Listing Parameters and Request Paths
//!
//! Parameters are passed through as given: no range or vocabulary checks
//! happen here, the backend decides what a sort field or order means.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::constants::{PRODUCTS_COUNT_RESOURCE, PRODUCTS_RESOURCE};
use crate::error::{Error, Result};

/// Parameters for the primary listing (category scoped)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingParams {
    pub category: String,
    pub page: u32,
    pub sort_field: String,
    pub sort_order: String,
    /// Page size; omitted from the query when `None`
    #[serde(default)]
    pub size: Option<u32>,
}

impl ListingParams {
    pub fn new(
        category: impl Into<String>,
        page: u32,
        sort_field: impl Into<String>,
        sort_order: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            page,
            sort_field: sort_field.into(),
            sort_order: sort_order.into(),
            size: None,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Narrow these parameters to a subcategory
    pub fn in_subcategory(&self, subcategory: impl Into<String>) -> SubcategoryParams {
        SubcategoryParams {
            category: self.category.clone(),
            subcategory: subcategory.into(),
            page: self.page,
            sort_field: self.sort_field.clone(),
            sort_order: self.sort_order.clone(),
            size: self.size,
        }
    }

    pub fn to_query(&self) -> ProductQuery {
        ProductQuery::listing(
            &self.category,
            None,
            self.page,
            &self.sort_field,
            &self.sort_order,
            self.size,
        )
    }
}

/// Parameters for the secondary listing (category and subcategory scoped)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubcategoryParams {
    pub category: String,
    pub subcategory: String,
    pub page: u32,
    pub sort_field: String,
    pub sort_order: String,
    #[serde(default)]
    pub size: Option<u32>,
}

impl SubcategoryParams {
    pub fn to_query(&self) -> ProductQuery {
        ProductQuery::listing(
            &self.category,
            Some(&self.subcategory),
            self.page,
            &self.sort_field,
            &self.sort_order,
            self.size,
        )
    }
}

/// Parameters for the filtered listing; the category comes from the store
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilteredParams {
    pub subcategory: String,
    pub page: u32,
    pub sort_field: String,
    pub sort_order: String,
    #[serde(default)]
    pub size: Option<u32>,
}

impl FilteredParams {
    pub fn new(
        subcategory: impl Into<String>,
        page: u32,
        sort_field: impl Into<String>,
        sort_order: impl Into<String>,
    ) -> Self {
        Self {
            subcategory: subcategory.into(),
            page,
            sort_field: sort_field.into(),
            sort_order: sort_order.into(),
            size: None,
        }
    }

    pub fn to_query(&self, category: &str) -> ProductQuery {
        ProductQuery::listing(
            category,
            Some(&self.subcategory),
            self.page,
            &self.sort_field,
            &self.sort_order,
            self.size,
        )
    }
}

/// A request against the products resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    resource: &'static str,
    params: Vec<(&'static str, String)>,
}

impl ProductQuery {
    /// `products?main=..[&sub=..]&page=..&sortType=..&order=..[&size=..]`
    pub fn listing(
        category: &str,
        subcategory: Option<&str>,
        page: u32,
        sort_field: &str,
        sort_order: &str,
        size: Option<u32>,
    ) -> Self {
        let mut params = vec![("main", category.to_string())];
        if let Some(sub) = subcategory {
            params.push(("sub", sub.to_string()));
        }
        params.push(("page", page.to_string()));
        params.push(("sortType", sort_field.to_string()));
        params.push(("order", sort_order.to_string()));
        if let Some(size) = size {
            params.push(("size", size.to_string()));
        }

        Self {
            resource: PRODUCTS_RESOURCE,
            params,
        }
    }

    /// `products/count?main=..`
    pub fn count(category: &str) -> Self {
        Self {
            resource: PRODUCTS_COUNT_RESOURCE,
            params: vec![("main", category.to_string())],
        }
    }

    /// Add `size` when the query does not carry one already
    pub fn with_default_size(mut self, size: Option<u32>) -> Self {
        if let Some(size) = size
            && self.resource == PRODUCTS_RESOURCE
            && self.param("size").is_none()
        {
            self.params.push(("size", size.to_string()));
        }
        self
    }

    pub fn resource(&self) -> &str {
        self.resource
    }

    /// Raw (unencoded) value of a query parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render as a relative, URL-encoded path
    pub fn to_path(&self) -> Result<String> {
        if self.params.is_empty() {
            return Ok(self.resource.to_string());
        }

        let mut url = Url::parse("http://query.invalid/").map_err(|e| Error::Invalid {
            message: format!("query base url: {e}"),
        })?;
        url.query_pairs_mut()
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())));

        Ok(format!("{}?{}", self.resource, url.query().unwrap_or_default()))
    }
}
