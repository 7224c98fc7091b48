pub const TITLE: &str = "PDF Merger";
pub const PROMPT: &str = "> ";
pub const UPLOAD_PROMPT: &str = "Drop PDF files here: add <path>...";
pub const LOADING_TEXT: &str = "Merging PDFs...";
pub const CONFIRM_CLEAR: &str = "Are you sure you want to clear all files? [y/N]";
pub const RULE: &str = "----------------------------------------";

pub const HELP: &[&str] = &[
    "add <path>...      upload one or more PDF files (quote paths with spaces)",
    "remove <n>         remove the file at row n",
    "move <a> <b>       drag row a onto row b (swaps them)",
    "drag <n>           start dragging row n",
    "over <n>           drag over row n",
    "leave <n>          drag away from row n",
    "drop <n>           drop onto row n",
    "cancel             abandon the drag",
    "name <text>        set the output file name (blank for default)",
    "merge              merge the listed files in order",
    "clear              remove all files",
    "download           save the merged PDF",
    "new                start a new merge",
    "help               show this help",
    "quit               exit",
];
