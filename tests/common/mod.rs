// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

#![allow(dead_code)]

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the test harness; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write `contents` to a fresh file in the temp dir and return its path.
pub fn write_temp_config(contents: &str) -> anyhow::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("csp-policy_{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents)?;
    Ok(path)
}
