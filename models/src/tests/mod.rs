mod share;
mod share_string;
