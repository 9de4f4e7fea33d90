pub mod gitea_server;
