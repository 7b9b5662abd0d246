pub mod setapikey;
