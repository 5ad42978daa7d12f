mod property_buffer;
