pub mod export;
pub mod prefill;
pub mod prompts;
pub mod render;

pub use export::{outputs_json, write_bundle_csv, write_outputs_json, write_schedule_csv};
pub use prefill::build_prefill_url;
pub use prompts::{
    collect_bundle_input, collect_planner_input, prompt_key, prompt_yes_no, resolve_key,
    suggest_key,
};
pub use render::{
    display_outputs, display_period, display_schedule, drink_volume_note, format_bottle_plan,
    format_bundle, format_options, format_period, format_product_plan, format_summary, plan_rows,
    schedule_to_text, PlanRow,
};
