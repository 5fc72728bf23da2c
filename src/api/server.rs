use crate::api::routes;
use crate::config::Shared;
use crate::zone_store::DynZoneStore;
use std::future::Future;
use std::net::SocketAddr;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: Shared,
    pub zone_store: DynZoneStore,
}

pub fn new(
    config: Shared,
    zone_store: DynZoneStore,
) -> impl Future<Output = hyper::Result<()>> {
    axum::Server::bind(&config.bind_addr).serve(
        routes::new(AppState { config, zone_store })
            .into_make_service_with_connect_info::<SocketAddr>(),
    )
}
