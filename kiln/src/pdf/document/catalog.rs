use crate::{
    error::KilnError,
    pdf::{
        dictionary,
        document::{dict_types, Document, Structure, K_COUNT, K_KIDS, K_PAGES, K_TYPE},
        Array, Name, Object, ObjectArena,
    },
};

pub(crate) const K_PAGE_LAYOUT: &[u8] = b"PageLayout";
pub(crate) const K_OPEN_ACTION: &[u8] = b"OpenAction";
pub(crate) const K_PROC_SET: &[u8] = b"ProcSet";

const PROC_SET: [&str; 5] = ["PDF", "Text", "ImageB", "ImageC", "ImageI"];

pub(crate) const PAGES_NAME: &str = "Pages";
pub(crate) const RESOURCES_NAME: &str = "Resources";
pub(crate) const CATALOG_NAME: &str = "Catalog";
pub(crate) const FIRST_PAGE_NAME: &str = "page_1";

/// Page tree, shared resources and catalog, in this order.
pub(crate) fn init_structure(arena: &mut ObjectArena) -> Result<Structure, KilnError> {
    let pages = arena.add(
        PAGES_NAME,
        dictionary([
            (K_TYPE, Name::from(dict_types::PAGES).into()),
            (K_KIDS, Array::new().into()),
            (K_COUNT, Object::Integer(0)),
        ]),
    )?;

    let resources = arena.add(
        RESOURCES_NAME,
        dictionary([
            (
                K_PROC_SET,
                Object::from(
                    PROC_SET
                        .iter()
                        .map(|p| Object::Name(Name::from_str(p)))
                        .collect::<Vec<_>>(),
                ),
            ),
            (dict_types::XOBJECT, dictionary([]).into()),
            (dict_types::FONT, dictionary([]).into()),
        ]),
    )?;

    let catalog = arena.add(
        CATALOG_NAME,
        dictionary([
            (K_TYPE, Name::from(dict_types::CATALOG).into()),
            (K_PAGES, pages.reference().into()),
            (K_PAGE_LAYOUT, Name::from_str("OneColumn").into()),
        ]),
    )?;

    Ok(Structure {
        pages,
        resources,
        catalog,
    })
}

impl Document {
    /// Opens the viewer on the first page, fitting its width.
    pub(crate) fn update_open_action(&mut self) {
        let first_page = match self.arena.lookup(FIRST_PAGE_NAME) {
            Some(page) => page,
            None => return,
        };
        let action = Object::from(vec![
            Object::Reference(first_page.reference()),
            Object::Name(Name::from_str("FitH")),
            Object::Null,
        ]);
        if let Some(catalog) = self.arena.get_mut(self.structure.catalog) {
            catalog
                .dictionary_mut()
                .insert(Name::from(K_OPEN_ACTION), action);
        }
    }
}
