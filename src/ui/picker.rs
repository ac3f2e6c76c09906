//! Terminal record picker
//!
//! Offers the catalog's records of the eligible collections, minus whatever
//! the request's filters rule out, using dialoguer prompts.

use super::format::format_doc;
use crate::i18n::DateLocale;
use crate::relations::{Catalog, PickerOutcome, PickerRequest, RecordPicker, RelationError, SelectionMap};
use dialoguer::{MultiSelect, Select, theme::ColorfulTheme};

/// Picker backed by dialoguer prompts over a `Catalog`
///
/// With row selections enabled (and not in add mode) the user ticks any
/// number of rows and the result is a bulk selection map; otherwise a single
/// record is picked and reported as added.
pub struct DialoguerPicker<'a> {
    catalog: &'a Catalog,
    date_locale: DateLocale,
    add_mode: bool,
    theme: ColorfulTheme,
}

impl<'a> DialoguerPicker<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, date_locale: DateLocale) -> Self {
        Self {
            catalog,
            date_locale,
            add_mode: false,
            theme: ColorfulTheme::default(),
        }
    }

    /// Always pick a single record to append
    #[must_use]
    pub fn add_mode(mut self, add_mode: bool) -> Self {
        self.add_mode = add_mode;
        self
    }

    /// Rows the picker would offer for `request`
    #[must_use]
    pub fn items(&self, request: &PickerRequest) -> Vec<(String, String)> {
        self.catalog
            .candidates(&request.collections, &request.filters)
            .into_iter()
            .map(|doc| (doc.id.clone(), format_doc(doc, self.date_locale)))
            .collect()
    }
}

fn picker_error(e: dialoguer::Error) -> RelationError {
    RelationError::Picker(e.to_string())
}

impl RecordPicker for DialoguerPicker<'_> {
    fn open(&mut self, request: &PickerRequest) -> crate::relations::error::Result<PickerOutcome> {
        let items = self.items(request);
        if items.is_empty() {
            return Ok(PickerOutcome::Cancelled);
        }
        let labels: Vec<&str> = items.iter().map(|(_, label)| label.as_str()).collect();

        if request.enable_row_selections && !self.add_mode {
            let chosen = MultiSelect::with_theme(&self.theme)
                .with_prompt(&request.title)
                .items(&labels)
                .interact_opt()
                .map_err(picker_error)?;

            return Ok(chosen.map_or(PickerOutcome::Cancelled, |indices| {
                let selection: SelectionMap = items
                    .iter()
                    .enumerate()
                    .map(|(i, (id, _))| (id.clone(), indices.contains(&i)))
                    .collect();
                PickerOutcome::Bulk(selection)
            }));
        }

        let chosen = Select::with_theme(&self.theme)
            .with_prompt(&request.title)
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(picker_error)?;

        Ok(chosen
            .and_then(|i| items.get(i))
            .map_or(PickerOutcome::Cancelled, |(id, _)| PickerOutcome::Added(id.clone())))
    }
}
