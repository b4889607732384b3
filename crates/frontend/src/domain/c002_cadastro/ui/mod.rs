pub mod view;

pub use view::CadastroPage;
