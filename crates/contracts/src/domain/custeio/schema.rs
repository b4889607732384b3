//! Section schema registry.
//!
//! Every dynamic section of the wizard is described here as data: a list of
//! typed field specs keyed by activity or culture name. The frontend renders
//! DOM from these schemas; tests check field naming without touching a DOM.
//! Field names follow the layout of the records already stored remotely, so
//! collect/restore and the remote partitioning agree on what a field is
//! called.

use super::forms::{Activity, CultureKind};

/// Annual cultures offered on the "Cultura Anual" picker.
pub const ANNUAL_CULTURES: &[&str] = &["Algodão", "Arroz", "Milho", "Soja", "Sorgo", "Trigo"];

/// Perennial cultures offered on the "Cultura Perene" picker.
pub const PERENNIAL_CULTURES: &[&str] = &[
    "Cana-de-açúcar",
    "Café Arábica",
    "Café",
    "Laranja para indústria",
    "Laranja de mesa",
];

/// Marker embedded in annual-culture field names (`<name>_cultura_anual_<suffix>`).
/// Doubles as the recovery key when an old record carries no explicit
/// selection list.
pub const ANNUAL_CULTURE_MARKER: &str = "_cultura_anual_";

const NIVEIS_TECNOLOGICOS: &[&str] = &["Alto", "Médio", "Baixo"];
const SIM_NAO: &[&str] = &["Sim", "Não"];

/// How a field is rendered and which value semantics it has.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldControl {
    Text,
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    Select { options: &'static [&'static str] },
    Checkbox,
    Textarea,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub control: FieldControl,
    pub required: bool,
    /// Sub-heading rendered above this field when it differs from the
    /// previous field's group.
    pub group: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionSchema {
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl SectionSchema {
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

fn text(name: impl Into<String>, label: impl Into<String>) -> FieldSpec {
    FieldSpec {
        name: name.into(),
        label: label.into(),
        control: FieldControl::Text,
        required: true,
        group: None,
    }
}

fn number(name: impl Into<String>, label: impl Into<String>) -> FieldSpec {
    FieldSpec {
        name: name.into(),
        label: label.into(),
        control: FieldControl::Number {
            min: Some(0.0),
            max: None,
            step: Some(0.01),
        },
        required: true,
        group: None,
    }
}

fn percent(name: impl Into<String>, label: impl Into<String>) -> FieldSpec {
    FieldSpec {
        control: FieldControl::Number {
            min: Some(0.0),
            max: Some(100.0),
            step: Some(0.01),
        },
        ..number(name, label)
    }
}

fn year(name: impl Into<String>, label: impl Into<String>) -> FieldSpec {
    FieldSpec {
        control: FieldControl::Number {
            min: Some(1900.0),
            max: Some(2100.0),
            step: Some(1.0),
        },
        ..number(name, label)
    }
}

fn select(
    name: impl Into<String>,
    label: impl Into<String>,
    options: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        name: name.into(),
        label: label.into(),
        control: FieldControl::Select { options },
        required: true,
        group: None,
    }
}

fn grouped(mut spec: FieldSpec, group: &'static str) -> FieldSpec {
    spec.group = Some(group);
    spec
}

fn optional(mut spec: FieldSpec) -> FieldSpec {
    spec.required = false;
    spec
}

/// Schema for an activity's own fields. The two culture activities host
/// pickers instead of fields, so their schemas are empty.
pub fn activity_schema(activity: Activity) -> SectionSchema {
    let fields = match activity {
        Activity::CulturaAnual | Activity::CulturaPerene => Vec::new(),
        Activity::AgriculturaGeral => vec![
            text("agricultura_geral_descricao", "Descrição da produção agrícola"),
            number("agricultura_geral_producao", "Produção estimada (ton)"),
        ],
        Activity::BovinoCorte => vec![
            number("bovino_corte_cabecas", "Quantidade de cabeças"),
            text("bovino_corte_sistema", "Sistema de criação"),
        ],
        Activity::BovinoLeite => vec![
            number("bovino_leite_vacas", "Quantidade de vacas leiteiras"),
            number("bovino_leite_producao", "Produção diária (litros)"),
        ],
        Activity::PecuariaGeral => vec![
            text("pecuaria_geral_tipo", "Tipo de pecuária"),
            number("pecuaria_geral_animais", "Quantidade total de animais"),
        ],
    };
    SectionSchema {
        title: activity.as_str().to_string(),
        fields,
    }
}

/// Schema for one annual-culture sub-form. Every marker-suffixed field name
/// is `<culture>_cultura_anual_<suffix>`; the harvest history keeps its
/// legacy `<culture>_hist_*` names.
pub fn annual_culture_schema(culture: &str) -> SectionSchema {
    const HIST: &str = "Histórico de safras anteriores";
    const SAFRA: &str = "Dados da safra prevista";
    const FINANCEIRO: &str = "Dados financeiros da safra prevista";

    let f = |suffix: &str| format!("{culture}{ANNUAL_CULTURE_MARKER}{suffix}");
    let fields = vec![
        grouped(number(format!("{culture}_hist_3anos_ha"), "03 anos atrás (ha)"), HIST),
        number(format!("{culture}_hist_2anos_ha"), "02 anos atrás (ha)"),
        number(format!("{culture}_hist_1ano_ha"), "01 ano atrás (ha)"),
        text(f("municipio"), "Município"),
        text(f("matricula"), "Matrícula"),
        grouped(
            number(f("area_plantio"), "Área de plantio da cultura na safra prevista (ha)"),
            SAFRA,
        ),
        percent(f("pct_irrigacao"), "Percentual da área total da cultura com irrigação"),
        percent(
            f("pct_mecanizacao"),
            "Percentual da área total da cultura com mecanização de colheita",
        ),
        percent(
            f("pct_consumo_proprio"),
            "Percentual da produção utilizada para consumo próprio",
        ),
        percent(
            f("pct_armazenamento"),
            "Percentual da produção com armazenamento próprio",
        ),
        number(
            f("produtividade_kg_ha"),
            "Produtividade média estimada para a safra (Kg/ha)",
        ),
        select(
            f("nivel_tecnologico"),
            "Nível tecnológico adotado para esta cultura",
            NIVEIS_TECNOLOGICOS,
        ),
        grouped(
            number(f("preco_venda_rkg"), "Preço estimado de venda (R$/kg)"),
            FINANCEIRO,
        ),
        number(f("custo_producao_rha"), "Custo estimado de produção (R$/ha)"),
        year(f("ano_safra_inicio"), "Ano-safra início"),
        year(f("ano_safra_fim"), "Ano-safra fim"),
    ];

    SectionSchema {
        title: culture.to_string(),
        fields,
    }
}

/// Schema for one perennial-culture sub-form.
pub fn perennial_culture_schema(culture: &str) -> SectionSchema {
    const HIST: &str = "Histórico de safras anteriores";
    const RENOVADA: &str = "Área renovada";
    const SAFRA: &str = "Dados da safra prevista";
    const FINANCEIRO: &str = "Dados financeiros";

    let f = |suffix: &str| format!("{culture}_{suffix}");
    let fields = vec![
        year(f("ano_previsao"), "Ano de previsão da colheita"),
        grouped(number(f("hist_3anos"), "3 anos atrás (ha)"), HIST),
        number(f("hist_2anos"), "2 anos atrás (ha)"),
        number(f("hist_1anos"), "1 ano atrás (ha)"),
        grouped(number(f("renovada_3anos"), "3 anos atrás (ha)"), RENOVADA),
        number(f("renovada_2anos"), "2 anos atrás (ha)"),
        number(f("renovada_1anos"), "1 ano atrás (ha)"),
        text(f("municipio"), "Município"),
        text(f("matricula"), "Matrícula"),
        grouped(year(f("safra_prevista"), "Safra prevista"), SAFRA),
        number(f("area_plantio"), "Área de plantio atual (ha)"),
        number(f("area_renovar"), "Área a ser renovada (ha)"),
        percent(f("pct_irrigacao"), "% irrigação"),
        percent(f("pct_mecanizacao"), "% mecanização"),
        percent(f("pct_consumo"), "% consumo próprio"),
        percent(f("pct_armazenamento"), "% armazenamento próprio"),
        number(f("produtividade"), "Produtividade (Kg/ha)"),
        select(f("nivel_tecnologico"), "Nível tecnológico", NIVEIS_TECNOLOGICOS),
        grouped(number(f("preco_venda"), "Preço venda (R$/kg)"), FINANCEIRO),
        number(f("custo_producao"), "Custo produção (R$/ha)"),
        number(f("custo_renovacao"), "Custo renovação (R$/ha)"),
        year(f("ano_safra_inicio"), "Ano-safra início"),
        year(f("ano_safra_fim"), "Ano-safra fim"),
    ];

    SectionSchema {
        title: culture.to_string(),
        fields,
    }
}

pub fn culture_schema(kind: CultureKind, culture: &str) -> SectionSchema {
    match kind {
        CultureKind::Annual => annual_culture_schema(culture),
        CultureKind::Perennial => perennial_culture_schema(culture),
    }
}

/// Schema for the n-th secondary property sub-form (1-based, matching the
/// field numbering of stored records).
pub fn secondary_property_schema(index: usize) -> SectionSchema {
    let f = |prefix: &str| format!("{prefix}_{index}");
    let fields = vec![
        text(f("secundaria_nome"), "Nome da Propriedade"),
        text(f("secundaria_municipio"), "Município / UF"),
        text(f("secundaria_matricula"), "Número de matrícula"),
        number(f("secundaria_area"), "Área utilizada (ha)"),
        select(f("secundaria_proprietario"), "Você é o proprietário?", SIM_NAO),
    ];
    SectionSchema {
        title: format!("Propriedade Secundária {index}"),
        fields,
    }
}

/// Owner-detail fields of the n-th secondary property. Rendered into a
/// block that only shows when the ownership select answers "Não", so none
/// of them is required.
pub fn secondary_owner_details_schema(index: usize) -> SectionSchema {
    let f = |prefix: &str| format!("{prefix}_{index}");
    let fields = vec![
        optional(text(
            f("secundaria_nome_proprietario"),
            "Nome ou Razão Social do Proprietário",
        )),
        optional(text(f("secundaria_cpf_cnpj"), "CPF/CNPJ")),
        optional(percent(f("secundaria_percentual"), "Percentual de Propriedade (%)")),
    ];
    SectionSchema {
        title: String::new(),
        fields,
    }
}

/// Name of the ownership select inside a secondary property sub-form.
pub fn secondary_owner_field(index: usize) -> String {
    format!("secundaria_proprietario_{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique_names(schema: &SectionSchema) {
        let mut seen = HashSet::new();
        for name in schema.field_names() {
            assert!(seen.insert(name.to_string()), "duplicate field name {name}");
        }
    }

    #[test]
    fn activity_schemas_have_unique_names() {
        for activity in Activity::all() {
            assert_unique_names(&activity_schema(activity));
        }
    }

    #[test]
    fn picker_activities_have_no_direct_fields() {
        assert!(activity_schema(Activity::CulturaAnual).fields.is_empty());
        assert!(activity_schema(Activity::CulturaPerene).fields.is_empty());
        assert!(!activity_schema(Activity::BovinoCorte).fields.is_empty());
    }

    #[test]
    fn annual_schema_names_are_prefixed_by_culture() {
        for culture in ANNUAL_CULTURES {
            let schema = annual_culture_schema(culture);
            assert_unique_names(&schema);
            for name in schema.field_names() {
                assert!(name.starts_with(&format!("{culture}_")), "{name}");
            }
        }
    }

    #[test]
    fn annual_schema_carries_the_recovery_marker() {
        let schema = annual_culture_schema("Soja");
        assert!(schema
            .field_names()
            .any(|n| n == "Soja_cultura_anual_area_plantio"));
        // Legacy history fields keep their short names, without the marker.
        assert!(schema.field_names().any(|n| n == "Soja_hist_3anos_ha"));
    }

    #[test]
    fn perennial_schema_names_are_prefixed_by_culture() {
        for culture in PERENNIAL_CULTURES {
            let schema = perennial_culture_schema(culture);
            assert_unique_names(&schema);
            for name in schema.field_names() {
                assert!(name.starts_with(&format!("{culture}_")), "{name}");
            }
        }
    }

    #[test]
    fn secondary_schema_is_indexed_and_marks_owner_extras_optional() {
        let schema = secondary_property_schema(2);
        assert_unique_names(&schema);
        assert!(schema.field_names().any(|n| n == "secundaria_nome_2"));
        assert_eq!(secondary_owner_field(2), "secundaria_proprietario_2");

        let extras = secondary_owner_details_schema(2);
        assert_unique_names(&extras);
        assert!(extras.field_names().any(|n| n == "secundaria_cpf_cnpj_2"));
        assert!(extras.fields.iter().all(|f| !f.required));
    }
}
