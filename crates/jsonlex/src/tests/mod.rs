mod property_resume;
