pub mod c001_custeio;
pub mod c002_cadastro;
pub mod c003_documentos;
