mod dashboard_scenarios;
mod ui_render;
