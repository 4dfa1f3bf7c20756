//! HTML rendering for the upload form and the results page.
//!
//! User-derived text is escaped before it reaches the markup.

use html_escape::encode_text;

use crate::document::PageRecord;

/// The static upload form served at `/`.
pub fn index_page() -> String {
    "<!DOCTYPE html>\n\
     <html>\n\
     <head><title>scansheet</title></head>\n\
     <body>\n\
     <h1>Upload a document</h1>\n\
     <form action=\"/ocr\" method=\"post\" enctype=\"multipart/form-data\">\n\
     <input type=\"file\" name=\"file\">\n\
     <input type=\"submit\" value=\"Run OCR\">\n\
     </form>\n\
     </body>\n\
     </html>\n"
        .to_string()
}

/// The results page embedding the extracted records and a download link.
pub fn results_page(records: &[PageRecord], download_href: &str) -> String {
    let mut rows = String::new();
    for record in records {
        let text: Vec<String> = record
            .text
            .iter()
            .map(|line| encode_text(line).into_owned())
            .collect();

        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            record.page_number,
            text.join("<br>")
        ));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>OCR Results</title></head>\n\
         <body>\n\
         <h1>OCR Results</h1>\n\
         <table border=\"1\">\n\
         <tr><th>Page</th><th>Text</th></tr>\n\
         {rows}\
         </table>\n\
         <p><a href=\"{href}\" download>Download spreadsheet</a></p>\n\
         </body>\n\
         </html>\n",
        rows = rows,
        href = encode_text(download_href),
    )
}
