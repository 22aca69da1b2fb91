mod components;
mod view;

pub use view::AssessmentView;

#[cfg(test)]
pub(crate) use view::AssessmentTestHandles;
