pub mod add_item_form;
pub mod item_list;
pub mod ui;
