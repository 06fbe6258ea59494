mod helpers;

mod confirm_email;
mod delete_restore;
mod login;
mod logout;
mod profile;
mod register;
