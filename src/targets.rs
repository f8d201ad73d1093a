//! Product pages scraped by default

const BASE: &str = "https://agriculture.newholland.com/lar/pt-br/equipamento/produtos";

/// Catalogue paths relative to [`BASE`], in output order
pub const DEFAULT_TARGETS: &[&str] = &[
    // Tractors
    "tl/serie-30",
    "tl/T3F",
    "tl/t4",
    "tl/t4-75s",
    "tl/t5-110-s",
    "tl/t6",
    "tl/t6-methane-power",
    "tl/t7-lwb",
    "tl/t8-plm-intelligence",
    "tl/t9-plm-intelligence",
    "tl/tk4",
    "tl/tl5",
    "tl/tl5-acess%C3%ADvel",
    "tl/tt-e-ttf",
    "tl/tt4",
    // Combines
    "colheitadeiras/cr",
    "colheitadeiras/tc",
    "colheitadeiras/tx",
    // Headers
    "plataformas/plataforma-draper",
    "plataformas/plataforma-rigida",
    "plataformas/plataforma-superflex",
    "plataformas/plataforma-de-milho",
    // Sprayers
    "pulverizadores/DEFENSOR%202500",
    "pulverizadores/DEFENSOR%202500%20CANA",
    "pulverizadores/defensor-3500-hc",
    // Planters
    "semeadoras/pl6000",
    "semeadoras/pl7000",
];

/// Absolute URLs of the default product pages
pub fn default_targets() -> Vec<String> {
    DEFAULT_TARGETS
        .iter()
        .map(|path| format!("{}/{}", BASE, path))
        .collect()
}
