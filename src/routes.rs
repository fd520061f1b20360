pub mod routes;

pub mod inventory {
    pub mod inventory_handlers;
    pub mod inventory_models;
}
