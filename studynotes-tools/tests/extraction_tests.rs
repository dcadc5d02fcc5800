mod common;

use common::{
    pdf_with_content_streams, pdf_with_pages, pptx_with_order, pptx_with_slides,
    pptx_without_presentation, write_temp, SlideShape,
};
use studynotes_tools::extract::extract_text_from_path;
use studynotes_tools::{extract_text, DocumentKind};

#[test]
fn test_pdf_pages_are_joined_in_order() {
    let bytes = pdf_with_pages(&["Page 1", "Page 2", "Page 3"]);
    let file = write_temp(&bytes, ".pdf");

    let document = extract_text(file.path(), DocumentKind::Pdf).unwrap();
    assert_eq!(document.kind, DocumentKind::Pdf);
    assert_eq!(document.units, 3);
    assert_eq!(document.text, "Page 1\nPage 2\nPage 3");
}

#[test]
fn test_pdf_single_page() {
    let bytes = pdf_with_pages(&["Hello world"]);
    let file = write_temp(&bytes, ".pdf");

    let document = extract_text_from_path(file.path()).unwrap();
    assert_eq!(document.text, "Hello world");
}

#[test]
fn test_pdf_page_without_text_contributes_empty_line() {
    let bytes = pdf_with_pages(&["First", "", "Third"]);
    let file = write_temp(&bytes, ".pdf");

    let document = extract_text(file.path(), DocumentKind::Pdf).unwrap();
    assert_eq!(document.text, "First\n\nThird");
}

#[test]
fn test_pdf_without_text_layer_is_empty() {
    let bytes = pdf_with_pages(&["", ""]);
    let file = write_temp(&bytes, ".pdf");

    let document = extract_text(file.path(), DocumentKind::Pdf).unwrap();
    assert_eq!(document.units, 2);
    assert!(document.is_empty());
}

fn extract_pdf_content(content: &str) -> String {
    let bytes = pdf_with_content_streams(&[content]);
    let file = write_temp(&bytes, ".pdf");
    extract_text(file.path(), DocumentKind::Pdf).unwrap().text
}

#[test]
fn test_pdf_lines_inside_one_text_object_stay_separate() {
    let text = extract_pdf_content(
        "BT /F1 12 Tf 72 720 Td 14.4 TL (First line) Tj T* (Second line) Tj 0 -14.4 Td (Third line) Tj ET",
    );
    assert_eq!(text, "First line\nSecond line\nThird line");
}

#[test]
fn test_pdf_quote_operators_start_new_lines() {
    let text = extract_pdf_content("BT /F1 12 Tf 72 720 Td 12 TL (One) Tj (Two) ' 1 0 (Three) \" ET");
    assert_eq!(text, "One\nTwo\nThree");
}

#[test]
fn test_pdf_next_line_with_leading_operator() {
    let text = extract_pdf_content("BT /F1 12 Tf 72 720 Td (Heading) Tj 0 -20 TD (Body) Tj T* (More) Tj ET");
    assert_eq!(text, "Heading\nBody\nMore");
}

#[test]
fn test_pdf_horizontal_moves_stay_on_one_line() {
    let text = extract_pdf_content("BT /F1 12 Tf 72 720 Td (Left) Tj 100 0 Td ( right) Tj ET");
    assert_eq!(text, "Left right");
}

#[test]
fn test_pdf_text_matrix_moves_break_only_on_new_rows() {
    let text = extract_pdf_content(
        "BT /F1 12 Tf 1 0 0 1 72 720 Tm (Top) Tj 1 0 0 1 200 720 Tm ( row) Tj 1 0 0 1 72 700 Tm (Below) Tj ET",
    );
    assert_eq!(text, "Top row\nBelow");
}

#[test]
fn test_pdf_kerning_gap_in_array_becomes_space() {
    let text = extract_pdf_content("BT /F1 12 Tf 72 720 Td [(Word) -250 (gap) 50 (ped)] TJ ET");
    assert_eq!(text, "Word gapped");
}

#[test]
fn test_pdf_separate_text_objects_are_separate_lines() {
    let text = extract_pdf_content(
        "BT /F1 12 Tf 72 720 Td (Alpha) Tj ET BT /F1 12 Tf 72 700 Td (Beta) Tj ET",
    );
    assert_eq!(text, "Alpha\nBeta");
}

#[test]
fn test_pptx_shapes_join_with_newlines() {
    let bytes = pptx_with_slides(&[vec![
        SlideShape::Text(&["Title"]),
        SlideShape::Bare,
        SlideShape::Text(&["Bullet"]),
    ]]);
    let file = write_temp(&bytes, ".pptx");

    let document = extract_text(file.path(), DocumentKind::Pptx).unwrap();
    assert_eq!(document.kind, DocumentKind::Pptx);
    assert_eq!(document.units, 1);
    assert_eq!(document.text, "Title\n\nBullet");
}

#[test]
fn test_pptx_paragraphs_inside_one_shape() {
    let bytes = pptx_with_slides(&[vec![SlideShape::Text(&["Agenda", "", "Wrap-up"])]]);
    let file = write_temp(&bytes, ".pptx");

    let document = extract_text_from_path(file.path()).unwrap();
    assert_eq!(document.text, "Agenda\n\nWrap-up");
}

#[test]
fn test_pptx_slides_follow_presentation_order() {
    let slides = vec![
        vec![SlideShape::Text(&["written first"])],
        vec![SlideShape::Text(&["written second"])],
        vec![SlideShape::Text(&["written third"])],
    ];
    let bytes = pptx_with_order(&slides, &[2, 0, 1]);
    let file = write_temp(&bytes, ".pptx");

    let document = extract_text(file.path(), DocumentKind::Pptx).unwrap();
    assert_eq!(document.units, 3);
    assert_eq!(document.text, "written third\nwritten first\nwritten second");
}

#[test]
fn test_pptx_without_presentation_part_orders_slides_numerically() {
    let bytes = pptx_without_presentation(&[
        (10, vec![SlideShape::Text(&["tenth"])]),
        (2, vec![SlideShape::Text(&["second"])]),
        (1, vec![SlideShape::Text(&["first"])]),
    ]);
    let file = write_temp(&bytes, ".pptx");

    let document = extract_text(file.path(), DocumentKind::Pptx).unwrap();
    assert_eq!(document.units, 3);
    assert_eq!(document.text, "first\nsecond\ntenth");
}

#[test]
fn test_pptx_pictures_contribute_nothing() {
    let bytes = pptx_with_slides(&[
        vec![SlideShape::Picture, SlideShape::Text(&["Caption"])],
        vec![SlideShape::Picture],
        vec![SlideShape::Text(&["Closing"])],
    ]);
    let file = write_temp(&bytes, ".pptx");

    let document = extract_text(file.path(), DocumentKind::Pptx).unwrap();
    assert_eq!(document.units, 3);
    assert_eq!(document.text, "Caption\nClosing");
}

#[test]
fn test_pptx_without_slides_is_empty() {
    let bytes = pptx_with_slides(&[]);
    let file = write_temp(&bytes, ".pptx");

    let document = extract_text(file.path(), DocumentKind::Pptx).unwrap();
    assert_eq!(document.units, 0);
    assert!(document.is_empty());
}

#[test]
fn test_extension_dispatch_is_case_insensitive() {
    let bytes = pdf_with_pages(&["Shouting"]);
    let file = write_temp(&bytes, ".PDF");

    let document = extract_text_from_path(file.path()).unwrap();
    assert_eq!(document.kind, DocumentKind::Pdf);
    assert_eq!(document.text, "Shouting");
}
