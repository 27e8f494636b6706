pub use {
    anyhow,
    itertools,
    log,
    polars,
    pretty_env_logger,
    rayon,
    serde,
    serde_json,
    statrs,
};
