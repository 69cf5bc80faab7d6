pub mod dashboard_pipeline;
