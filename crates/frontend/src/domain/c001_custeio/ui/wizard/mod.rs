pub mod autosave;
pub mod context;
pub mod remote;
pub mod sections;
pub mod steps;
pub mod view;

pub use view::CusteioWizard;
