use crate::core::{Pipeline, RunSummary, TransformResult};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Extracts, transforms and loads once. When no row survives parsing the
    /// output is still written, with only its header.
    pub fn run(&mut self) -> Result<RunSummary> {
        tracing::info!("Starting ETL process");

        let products = self.pipeline.extract()?;
        tracing::info!("Extracted {} valid rows", products.len());
        self.monitor.log_stats("Extract");

        if products.is_empty() {
            let output = self.pipeline.load(&TransformResult::default())?;
            tracing::info!("No valid rows found, wrote header only to {}", output);
            self.monitor.log_final_stats();
            return Ok(RunSummary::default());
        }

        let result = self.pipeline.transform(products);
        tracing::info!(
            "Transformed {} rows, skipped {}",
            result.products.len(),
            result.rows_skipped
        );
        self.monitor.log_stats("Transform");

        let output = self.pipeline.load(&result)?;
        tracing::info!("Output saved to: {}", output);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        let summary = result.summary();
        tracing::info!("ETL finished: {}", summary);
        Ok(summary)
    }
}
