use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};

use super::{Bitmap, ExportError};
use crate::render::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

fn mm_to_pt(mm: f32) -> f32 {
    mm / 25.4 * 72.0
}

/// Assembles a bitmap into a PDF document.
pub trait DocumentWriter: Send + Sync {
    fn embed_full_page(&self, bitmap: &Bitmap) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct A4Writer;

impl DocumentWriter for A4Writer {
    fn embed_full_page(&self, bitmap: &Bitmap) -> Result<Vec<u8>, ExportError> {
        if bitmap.width == 0 || bitmap.height == 0 || bitmap.jpeg.is_empty() {
            return Err(ExportError::EmptyBitmap);
        }

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let image_id = Ref::new(4);
        let content_id = Ref::new(5);
        let info_id = Ref::new(6);
        let image_name = Name(b"Im1");

        let page_w = mm_to_pt(PAGE_WIDTH_MM);
        let page_h = mm_to_pt(PAGE_HEIGHT_MM);

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().x_objects().pair(image_name, image_id);
        page.finish();

        let mut image = pdf.image_xobject(image_id, &bitmap.jpeg);
        image.filter(Filter::DctDecode);
        image.width(bitmap.width as i32);
        image.height(bitmap.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        // Image space is the unit square; scale it to the whole page.
        let mut content = Content::new();
        content.save_state();
        content.transform([page_w, 0.0, 0.0, page_h, 0.0, 0.0]);
        content.x_object(image_name);
        content.restore_state();
        pdf.stream(content_id, &content.finish());

        pdf.document_info(info_id)
            .title(TextStr("Internship Certificate"))
            .producer(TextStr("certforge"));

        Ok(pdf.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_bitmap() -> Bitmap {
        Bitmap {
            width: 3,
            height: 4,
            jpeg: vec![0xFF, 0xD8, 0xFF, 0xD9],
        }
    }

    #[test]
    fn writes_single_a4_page() {
        let bytes = A4Writer.embed_full_page(&fake_bitmap()).unwrap();
        let text = String::from_utf8_lossy(&bytes);

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/DCTDecode"));
        assert!(text.contains("/MediaBox [0 0 595."));
    }

    #[test]
    fn empty_bitmap_is_rejected() {
        let empty = Bitmap {
            width: 0,
            height: 0,
            jpeg: Vec::new(),
        };
        assert!(matches!(
            A4Writer.embed_full_page(&empty),
            Err(ExportError::EmptyBitmap)
        ));
    }

    #[test]
    fn page_size_is_a4_in_points() {
        assert!((mm_to_pt(210.0) - 595.2756).abs() < 0.001);
        assert!((mm_to_pt(297.0) - 841.8898).abs() < 0.001);
    }
}
