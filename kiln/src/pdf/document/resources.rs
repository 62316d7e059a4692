use crate::{
    error::KilnError,
    pdf::{
        dictionary,
        document::{dict_types, Document, K_LENGTH, K_SUBTYPE, K_TYPE},
        Bytes, Dictionary, Name, Object, ObjectId, Resource,
    },
};

pub(crate) const DEFAULT_FONT: &str = "helvetica";
pub(crate) const DEFAULT_BASE_FONT: &str = "Helvetica";

const K_BASE_FONT: &[u8] = b"BaseFont";
const K_WIDTH: &[u8] = b"Width";
const K_HEIGHT: &[u8] = b"Height";
const K_COLOR_SPACE: &[u8] = b"ColorSpace";
const K_BITS_PER_COMPONENT: &[u8] = b"BitsPerComponent";

/// Layout of raw, already decoded pixels. 8 bits per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Gray8,
}

impl PixelFormat {
    pub fn components(&self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Gray8 => 1,
        }
    }

    fn color_space(&self) -> &'static str {
        match self {
            PixelFormat::Rgb8 => "DeviceRGB",
            PixelFormat::Gray8 => "DeviceGray",
        }
    }
}

pub(crate) fn font_object_name(name: &str) -> String {
    format!("font_{}", name)
}

impl Document {
    /// Sub dictionary of the shared resources, e.g. `Font` or `XObject`.
    fn resource_map(&mut self, key: &[u8]) -> Result<&mut Dictionary, KilnError> {
        self.arena
            .require_mut(self.structure.resources)?
            .dictionary_mut()
            .entry(Name::from(key))
            .or_insert_with(|| Dictionary::default().into())
            .dictionary_mut()
            .ok_or_else(|| KilnError::NotFound(format!("resource dictionary {}", String::from_utf8_lossy(key))))
    }

    /// Registers a standard font under `name` and returns its handle.
    ///
    /// The handle is taken even when the name turns out to be a duplicate.
    pub fn add_font(&mut self, name: &str, base_font: &str) -> Result<Name, KilnError> {
        self.font_count += 1;
        let handle = Name::from(format!("F{}", self.font_count).into_bytes());

        let font = self.arena.add(
            &font_object_name(name),
            dictionary([
                (K_TYPE, Name::from(dict_types::FONT).into()),
                (K_SUBTYPE, Name::from_str("Type1").into()),
                (K_BASE_FONT, Name::from_str(base_font).into()),
            ]),
        )?;
        self.arena.require_mut(font)?.resource = Some(Resource::Font {
            handle: handle.clone(),
            base_font: base_font.to_owned(),
        });
        self.resource_map(dict_types::FONT)?
            .insert(handle.clone(), font.reference().into());

        if !self.metrics.contains(name) && !self.metrics.contains(base_font) {
            log::warn!("no metrics for font {} ({}), text can't be measured", name, base_font);
        }
        log::debug!("font {} as {}", name, handle);
        Ok(handle)
    }

    /// Font object registered under `name`.
    pub fn font_object(&self, name: &str) -> Option<ObjectId> {
        self.arena
            .lookup(&font_object_name(name))
            .filter(|id| matches!(self.arena.get(*id).and_then(|o| o.resource()), Some(Resource::Font { .. })))
    }

    /// Adds raw pixels as image and returns its handle.
    ///
    /// No filter is applied, the pixels are written as they are.
    pub fn add_image(
        &mut self,
        name: &str,
        pixels: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> Result<Name, KilnError> {
        let handle = Name::from(format!("I{}", self.image_count).into_bytes());
        self.image_count += 1;

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(format.components()))
            .ok_or_else(|| {
                KilnError::InvalidStreamData(format!("image {} of {}x{} pixels is too large", name, width, height))
            })?;
        if pixels.len() != expected {
            return Err(KilnError::InvalidStreamData(format!(
                "image {} has {} bytes, {}x{} {:?} needs {}",
                name,
                pixels.len(),
                width,
                height,
                format,
                expected
            )));
        }

        let image = self.arena.add(
            name,
            dictionary([
                (K_TYPE, Name::from(dict_types::XOBJECT).into()),
                (K_SUBTYPE, Name::from_str("Image").into()),
                (K_WIDTH, width.into()),
                (K_HEIGHT, height.into()),
                (K_COLOR_SPACE, Name::from_str(format.color_space()).into()),
                (K_BITS_PER_COMPONENT, Object::Integer(8)),
                (K_LENGTH, expected.into()),
            ]),
        )?;
        let obj = self.arena.require_mut(image)?;
        obj.stream.push(Bytes::from(pixels));
        obj.resource = Some(Resource::Image {
            handle: handle.clone(),
        });
        self.resource_map(dict_types::XOBJECT)?
            .insert(handle.clone(), image.reference().into());

        log::debug!("image {} as {} ({}x{})", name, handle, width, height);
        Ok(handle)
    }

    /// Handle of the image registered as `name`.
    pub(crate) fn image_handle(&self, name: &str) -> Result<Name, KilnError> {
        self.arena
            .lookup(name)
            .and_then(|id| self.arena.get(id))
            .and_then(|obj| match obj.resource() {
                Some(Resource::Image { handle }) => Some(handle.clone()),
                _ => None,
            })
            .ok_or_else(|| KilnError::NotFound(format!("image {}", name)))
    }
}
