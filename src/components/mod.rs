pub mod definition_form;
pub mod icons;
pub mod result_card;
