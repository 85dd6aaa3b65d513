pub mod friend {
    pub mod schema;
    pub mod model;
    pub mod query;
    pub mod repository;
    pub mod repository_pg;
    pub mod repository_memory;
    pub mod events;
    pub mod notifier;
    pub mod service;
}
