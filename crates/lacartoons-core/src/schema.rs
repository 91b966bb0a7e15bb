//! Declarative selector table for the catalog site's markup
//!
//! Every structural query the parsers run lives here, so markup changes on
//! the remote site only need a new table (or a JSON file loaded by the CLI),
//! not parser changes. Selectors are compiled once into [`CompiledSchema`].

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{CrawlError, Result};

/// Version tag of the built-in table
pub const SCHEMA_VERSION: u32 = 1;

/// CSS selectors describing the catalog site's markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSchema {
    /// Bumped whenever the selectors are changed for a new site layout
    pub version: u32,

    /// Anchor of the page number shown in the second-to-last pagination item
    pub last_page: String,

    /// One anchor per catalog card; its own href is the detail URL
    pub catalog_entry: String,
    /// Relative to a catalog card
    pub entry_image: String,
    pub entry_name: String,
    pub entry_marker: String,
    pub entry_year: String,
    pub entry_rating: String,

    /// Parent container of every season on a show page
    pub season_container: String,
    /// Season headings, in page order
    pub season_heading: String,
    /// Episode lists that directly follow a season heading
    pub episode_list: String,
    /// Element directly after a season heading that wraps its episode list
    pub episode_list_wrapper: String,
    /// Episode list inside that wrapper
    pub episode_list_inner: String,
    /// Relative to an episode list
    pub episode_link: String,

    /// Embedded player on an episode page
    pub player_frame: String,
}

impl Default for SiteSchema {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            last_page: ".paginacion-all-series ul.pagination nav ul.pagination li:nth-last-child(2) a"
                .to_string(),
            catalog_entry: ".conjuntos-series a".to_string(),
            entry_image: "img".to_string(),
            entry_name: ".informacion-serie div p.nombre-serie".to_string(),
            entry_marker: ".informacion-serie div span.marcador-cartoon".to_string(),
            entry_year: ".informacion-serie div span.marcador-ano".to_string(),
            entry_rating: ".informacion-serie div span.valoracion".to_string(),
            season_container: ".contenedor-episondios".to_string(),
            season_heading: ".contenedor-episondios h4.estilo-temporada".to_string(),
            episode_list: ".contenedor-episondios h4.estilo-temporada + div ul".to_string(),
            episode_list_wrapper: "div".to_string(),
            episode_list_inner: "ul".to_string(),
            episode_link: "li a".to_string(),
            player_frame: ".container iframe".to_string(),
        }
    }
}

impl SiteSchema {
    /// Load a schema from JSON. Missing keys fall back to the built-in values.
    ///
    /// # Errors
    /// Returns `CrawlError::Parse` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CrawlError::Parse(format!("invalid schema: {e}")))
    }

    /// Compile every selector in the table.
    ///
    /// # Errors
    /// Returns `CrawlError::Parse` naming the first selector that does not compile.
    pub fn compile(&self) -> Result<CompiledSchema> {
        Ok(CompiledSchema {
            version: self.version,
            last_page: compile("last_page", &self.last_page)?,
            catalog_entry: compile("catalog_entry", &self.catalog_entry)?,
            entry_image: compile("entry_image", &self.entry_image)?,
            entry_name: compile("entry_name", &self.entry_name)?,
            entry_marker: compile("entry_marker", &self.entry_marker)?,
            entry_year: compile("entry_year", &self.entry_year)?,
            entry_rating: compile("entry_rating", &self.entry_rating)?,
            season_container: compile("season_container", &self.season_container)?,
            season_heading: compile("season_heading", &self.season_heading)?,
            episode_list: compile("episode_list", &self.episode_list)?,
            episode_list_wrapper: compile("episode_list_wrapper", &self.episode_list_wrapper)?,
            episode_list_inner: compile("episode_list_inner", &self.episode_list_inner)?,
            episode_link: compile("episode_link", &self.episode_link)?,
            player_frame: compile("player_frame", &self.player_frame)?,
        })
    }
}

fn compile(name: &str, css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| CrawlError::Parse(format!("Invalid selector {name} ({css}): {e:?}")))
}

/// [`SiteSchema`] with every selector compiled
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    pub version: u32,
    pub last_page: Selector,
    pub catalog_entry: Selector,
    pub entry_image: Selector,
    pub entry_name: Selector,
    pub entry_marker: Selector,
    pub entry_year: Selector,
    pub entry_rating: Selector,
    pub season_container: Selector,
    pub season_heading: Selector,
    pub episode_list: Selector,
    pub episode_list_wrapper: Selector,
    pub episode_list_inner: Selector,
    pub episode_link: Selector,
    pub player_frame: Selector,
}

impl CompiledSchema {
    /// Compile the built-in schema.
    ///
    /// # Errors
    /// Only fails if the built-in table itself is broken.
    pub fn builtin() -> Result<Self> {
        SiteSchema::default().compile()
    }
}
