//! Group-wise feature engine.

use std::collections::HashSet;

use polars::prelude::*;
use pricewise_math::Winsorizer;
use pricewise_primitives::NormalizedRow;
use pricewise_traits::{CategoryEncoder, PartitionContext, PartitionTransform};
use tracing::{debug, info};

use crate::{
    FeatureError, FeatureManifest, ForwardTargets, LagFeatures, RollingMean, SeasonalEncoder,
    SpatialEncoder,
    columns::{COMMODITY, DATE, MARKET, MONTH, PARTITION, PERIOD, PRICE, PRICE_SMOOTHED},
    rows_to_frame,
};

/// Which rows survive feature engineering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Require every lag and rolling feature; targets may be null.
    #[default]
    RequireHistory,
    /// Also require every forward target.
    RequireHistoryAndTargets,
}

/// Configuration for [`FeatureEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Lag offsets in months.
    pub lags: Vec<usize>,
    /// Trailing rolling-mean window in months.
    pub rolling_window: usize,
    /// Target horizons in months.
    pub horizons: Vec<usize>,
    /// Winsorization percentile for the smoothed path.
    pub winsor_percentile: f64,
    /// Row retention policy.
    pub retention: RetentionPolicy,
    /// Emit `m_<k>` seasonal dummies.
    pub seasonal: bool,
    /// Emit `region_<market>` spatial dummies.
    pub spatial: bool,
    /// Emit the diagnostic `price_smoothed` column.
    pub diagnostics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lags: vec![1, 3],
            rolling_window: 3,
            horizons: vec![1, 3, 6],
            winsor_percentile: 0.01,
            retention: RetentionPolicy::default(),
            seasonal: true,
            spatial: true,
            diagnostics: false,
        }
    }
}

/// Derives leakage-safe features per `(commodity, market)` partition.
///
/// Observations sharing a partition and month are first collapsed to their
/// mean price, so each partition is a strictly increasing monthly series.
/// Lags and the rolling mean only read earlier months of the same
/// partition; targets only read later months. Dummies are encoded over the
/// whole collapsed table before retention filtering.
pub struct FeatureEngine {
    config: EngineConfig,
    history: Vec<Box<dyn PartitionTransform>>,
    targets: ForwardTargets,
    encoders: Vec<Box<dyn CategoryEncoder>>,
    winsorizer: Winsorizer,
}

impl std::fmt::Debug for FeatureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureEngine")
            .field("config", &self.config)
            .field("history", &self.history.iter().map(|t| t.name()).collect::<Vec<_>>())
            .field("encoders", &self.encoders.iter().map(|e| e.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl FeatureEngine {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            history: vec![Box::new(LagFeatures::default()), Box::new(RollingMean::default())],
            targets: ForwardTargets::default(),
            encoders: vec![Box::new(SeasonalEncoder), Box::new(SpatialEncoder)],
            winsorizer: Winsorizer::default(),
        }
    }

    /// Create an engine from a configuration.
    ///
    /// # Errors
    /// Returns `FeatureError` if a lag, window, horizon or percentile is invalid.
    pub fn with_config(config: EngineConfig) -> Result<Self, FeatureError> {
        if config.lags.is_empty() {
            return Err(FeatureError::InvalidConfig("at least one lag is required".to_string()));
        }
        let history: Vec<Box<dyn PartitionTransform>> = vec![
            Box::new(LagFeatures::new(config.lags.clone())?),
            Box::new(RollingMean::new(config.rolling_window)?),
        ];
        let targets = ForwardTargets::new(config.horizons.clone())?;
        let winsorizer = Winsorizer::new(config.winsor_percentile)?;

        let mut encoders: Vec<Box<dyn CategoryEncoder>> = Vec::new();
        if config.seasonal {
            encoders.push(Box::new(SeasonalEncoder));
        }
        if config.spatial {
            encoders.push(Box::new(SpatialEncoder));
        }

        Ok(Self { config, history, targets, encoders, winsorizer })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Past-only columns every retained row must have.
    #[must_use]
    pub fn history_columns(&self) -> Vec<String> {
        self.history.iter().flat_map(|t| t.output_columns()).collect()
    }

    /// Forward target columns.
    #[must_use]
    pub fn target_columns(&self) -> Vec<String> {
        self.targets.output_columns()
    }

    /// Engineer features from normalized rows.
    ///
    /// Output columns are `date, commodity, market, price`, the history
    /// columns, `month`, the seasonal then spatial dummies, the targets and,
    /// with diagnostics on, `price_smoothed`. Rows are sorted by commodity,
    /// market and date.
    ///
    /// # Errors
    /// Returns `FeatureError` if a polars operation fails.
    pub fn run(&self, rows: &[NormalizedRow]) -> Result<DataFrame, FeatureError> {
        let partitions: HashSet<(&str, &str)> = rows.iter().map(NormalizedRow::partition).collect();
        let base = rows_to_frame(rows)?;

        let collapsed = base
            .lazy()
            .group_by_stable([col(COMMODITY), col(MARKET), col(DATE), col(MONTH), col(PERIOD)])
            .agg([col(PRICE).mean()])
            .sort([COMMODITY, MARKET, PERIOD], SortMultipleOptions::new().with_maintain_order(true))
            .collect()?;
        debug!(rows = rows.len(), collapsed = collapsed.height(), "collapsed to monthly partitions");

        let mut dummies: Vec<Expr> = Vec::new();
        let mut dummy_names: Vec<String> = Vec::new();
        for encoder in &self.encoders {
            let levels = encoder.levels(&collapsed)?;
            dummy_names.extend(levels.iter().skip(1).map(|level| encoder.dummy_name(level)));
            dummies.extend(encoder.encode(&collapsed)?);
        }

        let ctx = PartitionContext { value_col: PRICE, period_col: PERIOD, partition: &PARTITION };
        let mut exprs: Vec<Expr> = self.history.iter().flat_map(|t| t.exprs(&ctx)).collect();
        exprs.extend(self.targets.exprs(&ctx));
        exprs.extend(dummies);

        let collapsed_rows = collapsed.height();
        let mut lf = collapsed.lazy().with_columns(exprs);
        if self.config.diagnostics {
            lf = self.winsorizer.smoothed_path(lf, PRICE, &PARTITION, PRICE_SMOOTHED);
        }

        let history = self.history_columns();
        let targets = self.target_columns();
        let mut required: Vec<&str> = history.iter().map(String::as_str).collect();
        if self.config.retention == RetentionPolicy::RequireHistoryAndTargets {
            required.extend(targets.iter().map(String::as_str));
        }
        let keep = required
            .iter()
            .map(|&c| col(c).is_not_null())
            .reduce(Expr::and)
            .unwrap_or_else(|| lit(true));

        let mut order: Vec<&str> = vec![DATE, COMMODITY, MARKET, PRICE];
        order.extend(history.iter().map(String::as_str));
        order.push(MONTH);
        order.extend(dummy_names.iter().map(String::as_str));
        order.extend(targets.iter().map(String::as_str));
        if self.config.diagnostics {
            order.push(PRICE_SMOOTHED);
        }

        let out = lf
            .filter(keep)
            .select(order.iter().map(|&c| col(c)).collect::<Vec<_>>())
            .sort([COMMODITY, MARKET, DATE], SortMultipleOptions::new().with_maintain_order(true))
            .collect()?;

        info!(
            partitions = partitions.len(),
            input_rows = rows.len(),
            output_rows = out.height(),
            dropped = collapsed_rows - out.height(),
            columns = out.width(),
            "engineered features"
        );
        Ok(out)
    }

    /// Manifest of the model-ready columns of an engineered frame.
    #[must_use]
    pub fn manifest(&self, frame: &DataFrame) -> FeatureManifest {
        FeatureManifest::from_frame(frame)
    }
}

impl Default for FeatureEngine {
    fn default() -> Self {
        Self::new()
    }
}
