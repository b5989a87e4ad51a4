pub mod report_chart;
pub mod status_light;
