mod blob_enumerator_test;
mod keyword_lookup_test;
