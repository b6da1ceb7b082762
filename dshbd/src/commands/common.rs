use anyhow::Result;
use dshbd_core::Services;

use crate::config::load_config;

pub(crate) async fn services(cli: &crate::Cli) -> Result<Services> {
    let config = load_config(&cli.config)?;
    Services::new(config).await
}
