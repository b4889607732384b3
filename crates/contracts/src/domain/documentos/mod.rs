//! Required-document checklist for a credit application.
//!
//! A client record carries a nested `documentos` map: document name →
//! `{ url, status }`. The checklist partitions that map against the fixed
//! required list into pending, submitted and approved buckets.

use serde_json::{Map, Value};

/// Documents every application must eventually provide.
pub const DOCUMENTOS_OBRIGATORIOS: &[&str] = &[
    "CND - Certidão Negativa de Débitos(Tributos Federais e Dívida Ativa da União)",
    "CNH - Proponente",
    "CNH - Cônjuge",
    "Certidão de Nascimento/Casamento",
    "Declaração de IRPF",
    "Recibo de IRPF",
    "Declaração CMN - Declaração de Renegociações por Resoluções do CMN",
    "Certificado de Cadastro do Imóvel Rural (CCIR) - Imóvel Beneficiado",
    "Certidão Negativa de Débitos do Imóvel Rural ou Prova de Pagamento/Quitação do ITR",
    "Certidão de Inteiro Teor do Objeto da Cessão (Validade de até 1 ano)",
    "Certidão de Ônus do Imóvel Objeto da Cessão",
    "Licença Ambiental de Operação (LO)",
    "Roteiro de Acesso ao Imóvel",
    "Cadastro Ambiental Rural (CAR) - Documento de Inscrição",
    "Cadastro Ambiental Rural (CAR) - Demonstrativo de Situação",
    "Documentos de Cessão (Contratos e/ou Anuência) - Crédito Rural",
    "Autorização para Supressão de Vegetação (ASV)",
    "Outorga d'Água",
    "KML da Área Total do Imóvel",
    "KML da Área Beneficiada no Custeio",
];

pub const FIELD_DOCUMENTOS: &str = "documentos";
pub const STATUS_APROVADO: &str = "aprovado";

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentoEnviado {
    pub tipo: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentosPartition {
    pub pendentes: Vec<String>,
    pub enviados: Vec<DocumentoEnviado>,
    pub aprovados: Vec<DocumentoEnviado>,
}

/// Nested key removed from the client record when a submitted document is
/// rejected.
pub fn delete_field_path(doc_name: &str) -> String {
    format!("{FIELD_DOCUMENTOS}.{doc_name}")
}

/// Splits the stored `documentos` map into approved / submitted / pending.
/// Entries without a url are treated as never submitted; pending is the
/// fixed list minus everything seen.
pub fn partition_documentos(documentos: &Map<String, Value>) -> DocumentosPartition {
    let mut partition = DocumentosPartition::default();

    for (tipo, entry) in documentos {
        let Some(url) = entry.get("url").and_then(Value::as_str) else {
            continue;
        };
        let enviado = DocumentoEnviado {
            tipo: tipo.clone(),
            url: url.to_string(),
        };
        let aprovado = entry.get("status").and_then(Value::as_str) == Some(STATUS_APROVADO);
        if aprovado {
            partition.aprovados.push(enviado);
        } else {
            partition.enviados.push(enviado);
        }
    }

    partition.pendentes = DOCUMENTOS_OBRIGATORIOS
        .iter()
        .filter(|doc| {
            !partition.enviados.iter().any(|e| &e.tipo == *doc)
                && !partition.aprovados.iter().any(|a| &a.tipo == *doc)
        })
        .map(|doc| doc.to_string())
        .collect();

    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn documentos(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_map_leaves_everything_pending() {
        let partition = partition_documentos(&Map::new());
        assert_eq!(partition.pendentes.len(), DOCUMENTOS_OBRIGATORIOS.len());
        assert!(partition.enviados.is_empty());
        assert!(partition.aprovados.is_empty());
    }

    #[test]
    fn partitions_by_status_and_url_presence() {
        let docs = documentos(&[
            (
                "CNH - Proponente",
                json!({"url": "https://cdn/doc1.jpg", "status": "aprovado"}),
            ),
            (
                "Declaração de IRPF",
                json!({"url": "https://cdn/doc2.jpg", "status": "enviado"}),
            ),
            // No url yet: still pending.
            ("Recibo de IRPF", json!({"status": "enviado"})),
        ]);
        let partition = partition_documentos(&docs);
        assert_eq!(
            partition.aprovados,
            vec![DocumentoEnviado {
                tipo: "CNH - Proponente".into(),
                url: "https://cdn/doc1.jpg".into()
            }]
        );
        assert_eq!(partition.enviados.len(), 1);
        assert!(partition.pendentes.contains(&"Recibo de IRPF".to_string()));
        assert!(!partition.pendentes.contains(&"CNH - Proponente".to_string()));
    }

    #[test]
    fn delete_path_targets_the_nested_key() {
        assert_eq!(
            delete_field_path("CNH - Proponente"),
            "documentos.CNH - Proponente"
        );
    }
}
