//! Prevention, screening and consultation guidance layered on a risk result.
//!
//! Advisors read the guideline and test tables when they are configured and
//! otherwise return a small built-in answer instead of failing.

mod consult;
mod prevention;
mod screening;

pub use consult::{
    base_level, consult_advice, discussion_points, has_red_flag, preparation, specialist,
    ConsultAdvice, ConsultLevel, SpecialistReferral,
};
pub use prevention::{
    action_timeline, prevention_list, prevention_plan, PreventionPlan, TimelineStep,
    MAX_PREVENTION_ITEMS,
};
pub use screening::{
    adjust_frequency, cost_estimate, preparation_tips, recommend_tests, test_cap, test_priority,
    CostEstimate, TestPlan, TestRecommendation,
};
