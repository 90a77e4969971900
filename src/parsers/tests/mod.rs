mod image_rewrite_tests;
mod html_extract_tests;
