pub mod cadastro;
pub mod custeio;
pub mod documentos;
