use maple_cloud::{CloudService, KeyStore};
use maple_database::Database;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub cloud: CloudService,
    pub keys: KeyStore,
    /// Universe targeted when a command omits its universe argument.
    pub default_universe: Option<u64>,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
