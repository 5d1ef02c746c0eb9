use crate::models::{BundleInput, FuelConfig, KeyCategory, PlannerInput};
use crate::planner::constants::*;
use crate::planner::pipeline::{recompute, PlannerOutputs};

/// Owns the configuration, the current inputs and the outputs derived from them.
///
/// Every setter clamps its value, stores it and recomputes, so `outputs()` always
/// reflects the current inputs.
pub struct PlannerSession {
    config: FuelConfig,
    input: PlannerInput,
    bundle_input: BundleInput,
    outputs: PlannerOutputs,
}

impl PlannerSession {
    /// Create a session with default inputs.
    pub fn new(config: FuelConfig) -> Self {
        Self::with_inputs(config, PlannerInput::default(), BundleInput::default())
    }

    pub fn with_inputs(config: FuelConfig, input: PlannerInput, bundle_input: BundleInput) -> Self {
        let input = input.sanitized();
        let bundle_input = bundle_input.sanitized();
        let outputs = recompute(&input, &bundle_input, &config);
        Self {
            config,
            input,
            bundle_input,
            outputs,
        }
    }

    pub fn config(&self) -> &FuelConfig {
        &self.config
    }

    pub fn input(&self) -> &PlannerInput {
        &self.input
    }

    pub fn bundle_input(&self) -> &BundleInput {
        &self.bundle_input
    }

    pub fn outputs(&self) -> &PlannerOutputs {
        &self.outputs
    }

    /// Accepted keys for a select menu.
    pub fn options(&self, category: KeyCategory) -> Vec<&str> {
        self.config.rules.keys(category)
    }

    /// Re-run the pipeline on the current inputs.
    pub fn recompute(&mut self) -> &PlannerOutputs {
        self.outputs = recompute(&self.input, &self.bundle_input, &self.config);
        &self.outputs
    }

    fn update_planner(&mut self, f: impl FnOnce(&mut PlannerInput)) -> &PlannerOutputs {
        f(&mut self.input);
        self.input = self.input.sanitized();
        self.recompute()
    }

    fn update_bundle(&mut self, f: impl FnOnce(&mut BundleInput)) -> &PlannerOutputs {
        f(&mut self.bundle_input);
        self.bundle_input = self.bundle_input.sanitized();
        self.recompute()
    }

    // Planner inputs

    pub fn set_activity(&mut self, activity: &str) -> &PlannerOutputs {
        self.update_planner(|i| i.activity = activity.to_string())
    }

    pub fn set_duration_hours(&mut self, hours: f64) -> &PlannerOutputs {
        self.update_planner(|i| i.duration_hours = hours)
    }

    pub fn set_rpe(&mut self, rpe: f64) -> &PlannerOutputs {
        self.update_planner(|i| i.rpe = rpe)
    }

    pub fn set_conditions(&mut self, conditions: &str) -> &PlannerOutputs {
        self.update_planner(|i| i.conditions = conditions.to_string())
    }

    pub fn set_bottle_size_ml(&mut self, ml: u32) -> &PlannerOutputs {
        self.update_planner(|i| i.bottle_size_ml = ml)
    }

    pub fn set_sweat_rate(&mut self, sweat_rate: &str) -> &PlannerOutputs {
        self.update_planner(|i| i.sweat_rate = sweat_rate.to_string())
    }

    pub fn set_sweat_salt(&mut self, sweat_salt: &str) -> &PlannerOutputs {
        self.update_planner(|i| i.sweat_salt = sweat_salt.to_string())
    }

    pub fn set_sodium_replacement(&mut self, fraction: f64) -> &PlannerOutputs {
        self.update_planner(|i| i.sodium_replacement = fraction)
    }

    pub fn set_carb_mode(&mut self, carb_mode: &str) -> &PlannerOutputs {
        self.update_planner(|i| i.carb_mode = carb_mode.to_string())
    }

    /// Selecting "Custom" switches the caffeine fraction to the custom value.
    pub fn set_caffeine_protocol(&mut self, protocol: &str) -> &PlannerOutputs {
        self.update_planner(|i| i.caffeine_protocol = protocol.to_string())
    }

    pub fn set_caffeine_custom_fraction(&mut self, fraction: f64) -> &PlannerOutputs {
        self.update_planner(|i| i.caffeine_custom_fraction = fraction)
    }

    pub fn set_plan_style(&mut self, plan_style: &str) -> &PlannerOutputs {
        self.update_planner(|i| i.plan_style = plan_style.to_string())
    }

    pub fn set_apply_discount(&mut self, apply: bool) -> &PlannerOutputs {
        self.update_planner(|i| i.apply_discount = apply)
    }

    // 30-day bundle inputs

    pub fn set_sessions_30d(&mut self, sessions: u32) -> &PlannerOutputs {
        self.update_bundle(|b| b.sessions_30d = sessions)
    }

    pub fn set_avg_session_hours(&mut self, hours: f64) -> &PlannerOutputs {
        self.update_bundle(|b| b.avg_session_hours = hours)
    }

    pub fn set_fuelled_fraction(&mut self, fraction: f64) -> &PlannerOutputs {
        self.update_bundle(|b| b.fuelled_fraction = fraction)
    }

    pub fn set_bundle_discount(&mut self, apply: bool) -> &PlannerOutputs {
        self.update_bundle(|b| b.apply_discount = apply)
    }

    /// Whether the custom caffeine slider applies.
    pub fn uses_custom_caffeine(&self) -> bool {
        self.input.caffeine_protocol == CUSTOM_CAFFEINE_PROTOCOL
    }
}
