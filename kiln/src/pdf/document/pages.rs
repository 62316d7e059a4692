use crate::{
    error::KilnError,
    pdf::{
        dictionary,
        document::{
            dict_types, CurrentPage, Document, DEFAULT_PAGE_SIZE, K_CONTENTS, K_COUNT, K_KIDS, K_LENGTH,
            K_MEDIA_BOX, K_PARENT, K_RESOURCES, K_TYPE,
        },
        Bytes, Name, Object, ObjectId,
    },
};

/// Link from a page to its content stream.
pub(crate) const L_CONTENT: &str = "content";

impl Document {
    /// Adds a page and makes it the current one.
    ///
    /// The media box is `size`, else the document default, else A4.
    pub fn add_page(&mut self, size: Option<[f64; 4]>) -> Result<ObjectId, KilnError> {
        let size = size
            .or(self.options.default_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let number = self.page_count + 1;

        let content_name = format!("contents_{}", number);
        let page_name = format!("page_{}", number);
        if self.arena.lookup(&content_name).is_some() {
            return Err(KilnError::DuplicateName(content_name));
        }
        if self.arena.lookup(&page_name).is_some() {
            return Err(KilnError::DuplicateName(page_name));
        }

        let content = self
            .arena
            .add(&content_name, dictionary([(K_LENGTH, Object::Integer(0))]))?;
        let page = self.arena.add(
            &page_name,
            dictionary([
                (K_TYPE, Name::from(dict_types::PAGE).into()),
                (K_PARENT, self.structure.pages.reference().into()),
                (K_RESOURCES, self.structure.resources.reference().into()),
                (K_CONTENTS, content.reference().into()),
                (K_MEDIA_BOX, size.into()),
            ]),
        )?;
        self.arena.require_mut(page)?.links.insert(L_CONTENT, content);

        let pages = self.arena.require_mut(self.structure.pages)?.dictionary_mut();
        match pages.get_mut(K_KIDS).and_then(Object::array_mut) {
            Some(kids) => kids.push(page.reference().into()),
            None => {
                pages.insert(Name::from(K_KIDS), vec![Object::from(page.reference())].into());
            }
        }
        pages.insert(Name::from(K_COUNT), number.into());
        self.page_count = number;
        log::debug!("added {} ({})", page_name, page);

        self.set_current_page(page)?;
        Ok(page)
    }

    /// Directs all following drawing calls to `page`.
    pub fn set_current_page(&mut self, page: ObjectId) -> Result<(), KilnError> {
        let content = self
            .arena
            .require(page)?
            .link(L_CONTENT)
            .ok_or_else(|| KilnError::NotFound(format!("content of page {}", page)))?;
        self.arena.require(content)?;
        self.current = Some(CurrentPage { page, content });
        log::debug!("current page {}", page);
        Ok(())
    }

    pub fn current_page(&self) -> Option<ObjectId> {
        self.current.map(|c| c.page)
    }

    /// Appends operator text to the current content stream. Operators are
    /// built as `String`, so the bytes are UTF-8 already.
    pub(crate) fn push_content(&mut self, ops: String) -> Result<(), KilnError> {
        let content = self.current.ok_or(KilnError::NoCurrentPage)?.content;
        self.arena
            .require_mut(content)?
            .stream
            .push(Bytes::from(ops.into_bytes()));
        Ok(())
    }

    pub(crate) fn require_current_page(&self) -> Result<(), KilnError> {
        self.current.map(|_| ()).ok_or(KilnError::NoCurrentPage)
    }
}
