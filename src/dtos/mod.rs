pub mod post_dtos;
