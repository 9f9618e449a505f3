//! Shared, read-only state handed to every resource handler

use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::error::ApiResult;
use crate::core::extractors::RequestContext;
use crate::links::{LinkFactory, RouteRegistry};
use crate::sorting::{SortMappingRegistry, SortMappingTable};

/// Frozen registries and configuration
///
/// Built once by the server builder; cloning only bumps reference counts.
#[derive(Clone)]
pub struct ApiContext {
    pub sort_mappings: Arc<SortMappingRegistry>,
    pub routes: Arc<RouteRegistry>,
    pub config: Arc<AppConfig>,
}

impl ApiContext {
    pub fn new(
        sort_mappings: SortMappingRegistry,
        routes: RouteRegistry,
        config: AppConfig,
    ) -> Self {
        Self {
            sort_mappings: Arc::new(sort_mappings),
            routes: Arc::new(routes),
            config: Arc::new(config),
        }
    }

    /// Sort mapping table for an (output, storage) pair
    pub fn sort_table<O: 'static, S: 'static>(&self) -> ApiResult<&SortMappingTable> {
        Ok(self.sort_mappings.table::<O, S>()?)
    }

    /// Link factory for the current request, defaulting to `group`
    pub fn link_factory<'a>(
        &'a self,
        request: &RequestContext,
        group: &'a str,
    ) -> ApiResult<LinkFactory<'a>> {
        Ok(LinkFactory::new(
            &self.routes,
            request,
            &self.config.server.base_path,
            self.config.links.absolute,
            group,
        )?)
    }
}
